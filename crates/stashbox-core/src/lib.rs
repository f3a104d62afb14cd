//! # stashbox-core
//!
//! Core crate for Stashbox. Contains the unified error system,
//! configuration schemas, and the `BlobStore` trait for the remote
//! media host.
//!
//! This crate has **no** internal dependencies on other Stashbox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
