//! Seller error types.

use sniper_gateway::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SellerError {
    /// The account never held the target asset. Fatal, never retried.
    #[error("no {asset} tokens on the trade account")]
    NoBalance { asset: String },

    /// The configured reprice bound was exceeded.
    #[error("gave up after {attempts} reprice attempts")]
    RepriceExhausted { attempts: u32 },

    /// Transport or unexpected API fault from the gateway. Rejections and
    /// missing cancel targets are handled as state transitions and never
    /// reach this variant.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type SellerResult<T> = Result<T, SellerError>;
