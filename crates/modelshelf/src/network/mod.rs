//! Network operations
//!
//! HTTP client used by the remote catalog.

pub mod client;

pub use client::HttpClient;
