//! MatrixHub project API client for end-to-end tests.
//!
//! Provides an asynchronous client for creating, fetching and deleting
//! projects, plus a readiness gate that holds test execution until the
//! service answers its health probe.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod readiness;

pub use client::{wait_for_service_ready, ProjectClient, ProjectClientBuilder};
pub use models::CreateProjectRequest;
pub use readiness::{wait_until_ready, HealthProbe};

/// Convenient result alias that reuses the shared MatrixHub error type.
pub type Result<T> = matrixhub_core::Result<T>;
