//! Gateway error types.
//!
//! The seller matches on these variants to pick its next transition:
//! `Rejected` triggers a reprice, `OrderNotFound` on cancel means the
//! order already filled, everything else propagates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The exchange refused the order (invalid price/size, rate limit).
    #[error("order rejected by exchange ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The order no longer exists (already filled or cancelled).
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// Non-success API response outside the order placement path.
    #[error("exchange API error ({code}): {message}")]
    Api { code: String, message: String },

    /// Transport-level failure (connect, timeout, TLS, proxy).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
