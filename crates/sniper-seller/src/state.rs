//! Seller state machine states.

use std::fmt;

use sniper_core::{OrderId, Price, Quantity, SaleResult};

/// States of the order-placement retry machine.
///
/// `Waiting → CheckingBalance → CheckingPrice → Selling → MonitoringOrder
/// → {Cancelling, Completed}`, with CheckingPrice reachable again from
/// Selling (rejection) and Cancelling (successful cancel).
#[derive(Debug, Clone, PartialEq)]
pub enum SellerState {
    /// Polling wall-clock time against the listing timestamp.
    Waiting,
    /// Querying the available balance of the target asset.
    CheckingBalance,
    /// Polling the ticker until a sellable price appears.
    CheckingPrice { balance: Quantity },
    /// Placing the limit sell order.
    Selling { balance: Quantity, price: Price },
    /// Checking whether the placed order cleared the balance.
    MonitoringOrder {
        balance: Quantity,
        order_id: OrderId,
        price: Price,
    },
    /// Cancelling an unfilled order before repricing.
    Cancelling {
        balance: Quantity,
        order_id: OrderId,
        price: Price,
    },
    /// Terminal: the balance is sold (down to dust at most).
    Completed(SaleResult),
}

impl SellerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::CheckingBalance => "checking_balance",
            Self::CheckingPrice { .. } => "checking_price",
            Self::Selling { .. } => "selling",
            Self::MonitoringOrder { .. } => "monitoring_order",
            Self::Cancelling { .. } => "cancelling",
            Self::Completed(_) => "completed",
        }
    }
}

impl fmt::Display for SellerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_only_completed_is_terminal() {
        assert!(!SellerState::Waiting.is_terminal());
        assert!(!SellerState::CheckingBalance.is_terminal());
        assert!(!SellerState::CheckingPrice {
            balance: Quantity::new(dec!(100))
        }
        .is_terminal());

        let result = SaleResult::new(
            OrderId::new("oid"),
            Quantity::new(dec!(0)),
            Price::new(dec!(1.01)),
        );
        assert!(SellerState::Completed(result).is_terminal());
    }
}
