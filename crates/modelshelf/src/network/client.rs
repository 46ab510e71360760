//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT and timeout configuration.

use crate::config::network::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a new client with default modelshelf settings
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// GET a URL and deserialize the JSON response
    ///
    /// Non-success statuses are errors.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.inner.get(url).send()?.error_for_status()?;
        Ok(resp.json::<T>()?)
    }

    /// GET a URL, mapping 404 to `None`
    pub fn get_json_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let resp = self.inner.get(url).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;
        Ok(Some(resp.json::<T>()?))
    }
}
