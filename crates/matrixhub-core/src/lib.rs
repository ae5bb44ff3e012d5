//! # matrixhub-core
//!
//! Core types and utilities for testing against the MatrixHub API.
//!
//! This crate provides the domain types, error handling, response
//! classification and configuration shared by MatrixHub API clients.
//!
//! ## Modules
//!
//! - [`error`] - Transport, readiness and cancellation errors
//! - [`types`] - Projects, structured service errors and the result envelope
//! - [`response`] - Classification of raw responses into results
//! - [`config`] - End-to-end harness configuration
//! - [`client`] - HTTP client settings and default timeouts
//! - [`names`] - Unique names for test resources

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod names;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use response::classify;
pub use types::{OperationResult, Project, ServiceError};
