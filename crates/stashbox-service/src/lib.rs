//! # stashbox-service
//!
//! Business logic service layer for Stashbox. Each service orchestrates
//! repositories, the blob store, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod user;

#[cfg(test)]
pub(crate) mod testutil;

pub use context::RequestContext;
pub use file::{FileService, UploadService};
pub use folder::{DeleteReport, FolderService};
pub use user::UserService;
