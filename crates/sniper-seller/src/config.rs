//! Seller configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sniper_core::{Price, Quantity};

/// Configuration for one listing campaign.
///
/// The listing parameters (coin, timing, price floor) have no sensible
/// defaults and must be provided. The asset-specific tunables (dust
/// threshold, decimal precision) are configurable with conservative
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerConfig {
    /// Token to sell (e.g. "ABC").
    pub coin: String,
    /// Quote currency of the trading pair (e.g. "USDT").
    #[serde(default = "default_quote")]
    pub quote: String,
    /// Listing timestamp, Unix seconds.
    pub list_time: u64,
    /// Never sell below this price.
    pub min_price: Price,
    /// Multiplier applied to the best bid when computing the sell price.
    pub coefficient: Decimal,
    /// Pacing interval for the wait/retry poll loops (ms). Default: 500.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Residual balance at or below which the order counts as filled.
    /// Default: 5 whole units.
    #[serde(default = "default_dust_threshold")]
    pub dust_threshold: Quantity,
    /// Decimal places for computed sell prices. Default: 3.
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,
    /// Decimal places for order quantities (exchange lot size). Default: 2.
    #[serde(default = "default_quantity_decimals")]
    pub quantity_decimals: u32,
    /// Bound on reprice cycles (rejections and cancel-retries).
    /// 0 = unbounded. Default: 0.
    #[serde(default)]
    pub max_reprice_attempts: u32,
}

fn default_quote() -> String {
    "USDT".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_dust_threshold() -> Quantity {
    Quantity::new(Decimal::from(5))
}

fn default_price_decimals() -> u32 {
    3
}

fn default_quantity_decimals() -> u32 {
    2
}

impl SellerConfig {
    /// Trading pair symbol, e.g. "ABC-USDT".
    pub fn symbol(&self) -> String {
        format!("{}-{}", self.coin, self.quote)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_from_minimal_toml() {
        let config: SellerConfig = toml::from_str(
            r#"
            coin = "ABC"
            list_time = 1756360800
            min_price = "1.0"
            coefficient = "1.01"
            "#,
        )
        .unwrap();

        assert_eq!(config.symbol(), "ABC-USDT");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.dust_threshold, Quantity::new(dec!(5)));
        assert_eq!(config.price_decimals, 3);
        assert_eq!(config.quantity_decimals, 2);
        assert_eq!(config.max_reprice_attempts, 0);
    }
}
