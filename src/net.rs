// SPDX-License-Identifier: MPL-2.0

//! Shared blocking HTTP client
//!
//! Every outbound request goes through this module so the browser-like
//! `User-Agent` and the per-content-type `Accept` headers stay consistent.
//! Image requests additionally carry a `Referer`, which the wiki requires
//! for hotlinked uploads.

use std::time::Duration;

use serde_json::Value;

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { inner }
    }

    /// GET a JSON document.
    pub fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .inner
            .get(url)
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?;
        response
            .json::<Value>()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// GET an HTML page as raw text.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .inner
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()?
            .error_for_status()?;
        response
            .text()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// GET raw image bytes. `referer` is the wiki base origin.
    pub fn get_image(&self, url: &str, referer: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .inner
            .get(url)
            .header("Accept", "image/*,*/*")
            .header("Referer", referer)
            .send()?
            .error_for_status()?;
        let bytes = response
            .bytes()
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
