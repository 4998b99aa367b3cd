//! Unified SDK error types.

use crate::shared::AssetId;
use std::time::Duration;
use thiserror::Error;

/// Fallback text shown when the order service gives no message.
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Failed to create order. Please try again.";

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Local draft checks that run before the order service is called.
///
/// The `Display` text is the message shown next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please connect a wallet or enter a testnet address")]
    NoWallet,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please select at least one accepted token")]
    NoAcceptedTokens,

    #[error("Unsupported chain or token: {0}")]
    UnknownAsset(AssetId),
}

/// Failures reported by (or while waiting on) the order service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The service rejected the order with a human-readable message.
    #[error("{0}")]
    Service(String),

    /// The service failed without a usable message.
    #[error("{}", GENERIC_SUBMISSION_MESSAGE)]
    Unknown,

    #[error("Order submission timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed order response: {0}")]
    InvalidResponse(String),
}

impl SubmissionError {
    /// Build from an optional service message, falling back to [`SubmissionError::Unknown`].
    pub fn from_message(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => SubmissionError::Service(m),
            _ => SubmissionError::Unknown,
        }
    }
}

/// Outcome of a rejected `submit()` call on the draft controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Another submission is in flight or the service is busy.
    #[error("An order submission is already in progress")]
    Busy,
}
