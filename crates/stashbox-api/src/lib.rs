//! # stashbox-api
//!
//! HTTP layer for Stashbox built on Axum.
//!
//! Provides the REST endpoints, the session cookie extractor, DTOs, and
//! error mapping. All business rules live in `stashbox-service`; this
//! crate only translates HTTP in and out.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
