//! Core domain types for the listing-sniper sell bot.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Price`, `Quantity`: precision-safe numeric types
//! - `OrderId`, `Ticker`, `AccountType`: exchange-facing primitives
//! - `SaleResult`, `AccountContext`: the per-account sale record

pub mod decimal;
pub mod record;
pub mod types;

pub use decimal::{Price, Quantity};
pub use record::{AccountContext, SaleResult};
pub use types::{AccountType, OrderId, Ticker};
