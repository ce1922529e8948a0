//! Uniform client for the remote commerce API.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, TENANT_HEADER};
pub use error::ApiError;
