//! Per-account sale records.

use crate::{OrderId, Price, Quantity};

/// Outcome of one completed sale.
///
/// Created only when the seller reaches its terminal state and consumed
/// exactly once by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleResult {
    /// Exchange order id of the order that cleared the balance.
    pub order_id: OrderId,
    /// Residual balance observed at completion (dust, possibly zero).
    pub balance: Quantity,
    /// Limit price of the final order.
    pub price: Price,
}

impl SaleResult {
    pub fn new(order_id: OrderId, balance: Quantity, price: Price) -> Self {
        Self {
            order_id,
            balance,
            price,
        }
    }
}

/// Mutable context for one account's sale, owned exclusively by its seller.
///
/// `balance_before_selling` is set exactly once before any sell attempt and
/// `balance_after_selling` exactly once at the terminal transition; repeated
/// writes are ignored so the first observation always wins.
#[derive(Debug, Clone)]
pub struct AccountContext {
    account_name: String,
    balance_before_selling: Option<Quantity>,
    balance_after_selling: Option<Quantity>,
}

impl AccountContext {
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            balance_before_selling: None,
            balance_after_selling: None,
        }
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn balance_before_selling(&self) -> Option<Quantity> {
        self.balance_before_selling
    }

    pub fn balance_after_selling(&self) -> Option<Quantity> {
        self.balance_after_selling
    }

    pub fn record_balance_before(&mut self, balance: Quantity) {
        if self.balance_before_selling.is_none() {
            self.balance_before_selling = Some(balance);
        }
    }

    pub fn record_balance_after(&mut self, balance: Quantity) {
        if self.balance_after_selling.is_none() {
            self.balance_after_selling = Some(balance);
        }
    }

    /// Tokens sold: before minus after. `None` until both balances are known.
    pub fn tokens_sold(&self) -> Option<Quantity> {
        match (self.balance_before_selling, self.balance_after_selling) {
            (Some(before), Some(after)) => Some(before - after),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balances_set_exactly_once() {
        let mut ctx = AccountContext::new("acct-1");
        ctx.record_balance_before(Quantity::new(dec!(100)));
        ctx.record_balance_before(Quantity::new(dec!(50)));
        assert_eq!(ctx.balance_before_selling(), Some(Quantity::new(dec!(100))));

        ctx.record_balance_after(Quantity::new(dec!(3)));
        ctx.record_balance_after(Quantity::new(dec!(0)));
        assert_eq!(ctx.balance_after_selling(), Some(Quantity::new(dec!(3))));
    }

    #[test]
    fn test_tokens_sold_requires_both_balances() {
        let mut ctx = AccountContext::new("acct-1");
        assert_eq!(ctx.tokens_sold(), None);

        ctx.record_balance_before(Quantity::new(dec!(100)));
        assert_eq!(ctx.tokens_sold(), None);

        ctx.record_balance_after(Quantity::new(dec!(0)));
        assert_eq!(ctx.tokens_sold(), Some(Quantity::new(dec!(100))));
    }
}
