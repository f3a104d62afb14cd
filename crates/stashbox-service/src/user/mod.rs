//! User account use cases.

pub mod service;

pub use service::UserService;
