//! Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sniper_gateway::{KucoinCredentials, DEFAULT_BASE_URL};
use sniper_seller::SellerConfig;

use crate::error::{AppError, AppResult};

/// Exchange connection settings shared by all accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewaySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Directory for per-account report files. Default: "logs".
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            logs_dir: default_logs_dir(),
        }
    }
}

/// One exchange account to sell from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Human-readable account label, used in logs and report filenames.
    pub name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: String,
    /// Optional outbound proxy URL for this account's requests.
    #[serde(default)]
    pub proxy: Option<String>,
}

impl AccountConfig {
    pub fn credentials(&self) -> KucoinCredentials {
        KucoinCredentials {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            api_passphrase: self.api_passphrase.clone(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub seller: SellerConfig,
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub report: ReportSettings,
    pub accounts: Vec<AccountConfig>,
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config {path}: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.accounts.is_empty() {
            return Err(AppError::Config("no accounts configured".to_string()));
        }
        if !self.seller.min_price.is_positive() {
            return Err(AppError::Config(
                "seller.min_price must be positive".to_string(),
            ));
        }
        if self.seller.coefficient.is_sign_negative() || self.seller.coefficient.is_zero() {
            return Err(AppError::Config(
                "seller.coefficient must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MINIMAL: &str = r#"
        [seller]
        coin = "ABC"
        list_time = 1756360800
        min_price = "1.0"
        coefficient = "1.01"

        [[accounts]]
        name = "acct-1"
        api_key = "key"
        api_secret = "secret"
        api_passphrase = "phrase"
    "#;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: AppConfig = toml::from_str(MINIMAL).unwrap();
        config.validate().unwrap();

        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gateway.timeout(), Duration::from_secs(10));
        assert_eq!(config.report.logs_dir, "logs");
        assert_eq!(config.seller.coefficient, dec!(1.01));
        assert_eq!(config.accounts.len(), 1);
        assert!(config.accounts[0].proxy.is_none());
    }

    #[test]
    fn test_empty_accounts_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            accounts = []

            [seller]
            coin = "ABC"
            list_time = 1756360800
            min_price = "1.0"
            coefficient = "1.01"
            "#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_account_proxy_is_optional_per_account() {
        let config: AppConfig = toml::from_str(
            r#"
            [seller]
            coin = "ABC"
            list_time = 1756360800
            min_price = "1.0"
            coefficient = "1.01"

            [[accounts]]
            name = "direct"
            api_key = "k1"
            api_secret = "s1"
            api_passphrase = "p1"

            [[accounts]]
            name = "proxied"
            api_key = "k2"
            api_secret = "s2"
            api_passphrase = "p2"
            proxy = "http://127.0.0.1:8080"
            "#,
        )
        .unwrap();

        assert!(config.accounts[0].proxy.is_none());
        assert_eq!(
            config.accounts[1].proxy.as_deref(),
            Some("http://127.0.0.1:8080")
        );
    }
}
