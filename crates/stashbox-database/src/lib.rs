//! # stashbox-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Stashbox entities. The `UserStore`,
//! `FolderStore` and `FileStore` traits defined in [`repositories`]
//! are the seam the service layer consumes.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::{FileStore, FolderStore, UserStore};
