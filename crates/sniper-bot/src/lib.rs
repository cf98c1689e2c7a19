//! Listing sniper application: configuration, wiring, and orchestration.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AccountConfig, AppConfig, GatewaySettings, ReportSettings};
pub use error::{AppError, AppResult};
