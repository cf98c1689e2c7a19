//! Exchange gateway for the listing-sniper sell bot.
//!
//! Wraps the exchange's order-management REST surface behind the
//! `ExchangeGateway` trait: balance lookup, ticker lookup, limit sell
//! placement, and cancellation. The production implementation targets
//! KuCoin's v1 API with signed requests.

pub mod auth;
pub mod error;
pub mod gateway;
pub mod kucoin;

pub use auth::{KucoinCredentials, RequestSigner};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{BoxFuture, DynGateway, ExchangeGateway, MockGateway};
pub use kucoin::{KucoinGateway, DEFAULT_BASE_URL};
