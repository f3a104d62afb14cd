//! # stashbox-auth
//!
//! Authentication for Stashbox: Argon2id password hashing, sign-up form
//! policy, and database-backed cookie sessions.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and credential form rules
//! - `session`: session lifecycle (login creates a row, the row id is
//!   the cookie value, logout deletes it)

pub mod password;
pub mod session;

pub use password::{CredentialPolicy, PasswordHasher};
pub use session::{SessionManager, SessionStore};
