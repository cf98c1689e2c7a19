//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] sniper_gateway::GatewayError),

    #[error("Seller error: {0}")]
    Seller(#[from] sniper_seller::SellerError),

    #[error("Report error: {0}")]
    Report(#[from] sniper_report::ReportError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] sniper_telemetry::TelemetryError),

    #[error("Task error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type AppResult<T> = Result<T, AppError>;
