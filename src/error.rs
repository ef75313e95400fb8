// SPDX-License-Identifier: MPL-2.0

//! Error taxonomy for data acquisition

use thiserror::Error;

/// Failures that can occur while acquiring remote data.
///
/// Legitimately missing fields are not errors; they are represented as
/// `Option::None` at the call site. Every fetch site catches this error
/// locally and degrades to the next fallback tier.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request failed: connection, timeout, or non-success HTTP status.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response arrived but could not be interpreted.
    #[error("malformed payload: {0}")]
    Parse(String),
}
