//! Form-level credential rules for sign-up.

use validator::ValidateEmail;

use stashbox_core::config::AuthConfig;
use stashbox_core::error::AppError;

/// Validates sign-up form input against configured rules.
///
/// The rules mirror the classic web form: email must parse and fit in
/// 50 characters, passwords are short-bounded and must mix letters and
/// digits, display names fit the same length band as passwords.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    email_max: usize,
    password_min: usize,
    password_max: usize,
    name_max: usize,
}

impl CredentialPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            email_max: config.email_max_length,
            password_min: config.password_min_length,
            password_max: config.password_max_length,
            name_max: config.name_max_length,
        }
    }

    /// Validates a sign-up email address.
    pub fn validate_email(&self, email: &str) -> Result<(), AppError> {
        if email.is_empty() || email.len() > self.email_max {
            return Err(AppError::validation(format!(
                "Email must be between 1 and {} characters",
                self.email_max
            )));
        }

        if !email.validate_email() {
            return Err(AppError::validation("Email must be a valid email address"));
        }

        Ok(())
    }

    /// Validates a sign-up password.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.password_min || password.len() > self.password_max {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters",
                self.password_min, self.password_max
            )));
        }

        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(AppError::validation(
                "Password must contain at least a letter and a number",
            ));
        }

        Ok(())
    }

    /// Validates a folder or file display name.
    pub fn validate_name(&self, name: &str) -> Result<(), AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.len() > self.name_max {
            return Err(AppError::validation(format!(
                "Name must be between 1 and {} characters",
                self.name_max
            )));
        }
        Ok(())
    }
}
