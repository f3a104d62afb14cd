//! Download URL helpers.

/// Rewrite a blob URL so the media host serves it with an attachment
/// disposition.
///
/// The host exposes delivery flags as a path segment after `/blobs/`;
/// inserting `attachment/` makes browsers download instead of render.
/// URLs that do not contain a `/blobs/` segment are returned unchanged.
pub fn attachment_url(url: &str) -> String {
    match url.split_once("/blobs/") {
        Some((prefix, rest)) => format!("{prefix}/blobs/attachment/{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_attachment_segment() {
        assert_eq!(
            attachment_url("https://media.example.com/blobs/abc123/a.png"),
            "https://media.example.com/blobs/attachment/abc123/a.png"
        );
    }

    #[test]
    fn leaves_unrecognized_urls_alone() {
        assert_eq!(
            attachment_url("https://media.example.com/other/abc123"),
            "https://media.example.com/other/abc123"
        );
    }
}
