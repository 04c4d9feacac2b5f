//! Remote API client for the Matchbook backend.

mod client;

pub use client::{ApiClient, ApiError};
