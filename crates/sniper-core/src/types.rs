//! Exchange-facing primitive types.

use crate::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-of-book snapshot for a trading pair.
///
/// Only the bid side matters here: the bot sells into the best bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    /// Highest price a buyer is currently willing to pay.
    pub best_bid: Price,
}

impl Ticker {
    pub fn new(best_bid: Price) -> Self {
        Self { best_bid }
    }
}

/// Exchange account ledger to query balances from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Trading account (where listed tokens must sit to be sellable).
    #[default]
    Trade,
    /// Main/funding account.
    Main,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Main => "main",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_wire_name() {
        assert_eq!(AccountType::Trade.as_str(), "trade");
        assert_eq!(AccountType::Main.as_str(), "main");
    }

    #[test]
    fn test_order_id_display() {
        let id = OrderId::new("5bd6e9286d99522a52e458de");
        assert_eq!(id.to_string(), "5bd6e9286d99522a52e458de");
    }
}
