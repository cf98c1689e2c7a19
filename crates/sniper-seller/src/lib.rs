//! Listing-time sell engine.
//!
//! One [`Seller`] per exchange account drives the full sale of a newly
//! listed token: wait for the listing, check the balance, chase the best
//! bid with repriced limit orders, and finish once only dust remains.

pub mod clock;
pub mod config;
pub mod error;
pub mod seller;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SellerConfig;
pub use error::{SellerError, SellerResult};
pub use seller::Seller;
pub use state::SellerState;
