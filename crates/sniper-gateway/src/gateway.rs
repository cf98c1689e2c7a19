//! Exchange gateway trait and test double.
//!
//! Provides a trait-based abstraction over the exchange's order-management
//! REST endpoints. This allows for:
//! - Dependency injection for testing
//! - Separation of the selling logic from the transport

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use sniper_core::{AccountType, OrderId, Price, Quantity, Ticker};

use crate::error::GatewayResult;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Order-management surface of one exchange.
///
/// `get_balance` returning `None` means the asset was never held (a fatal
/// configuration error upstream); `get_ticker` returning `None` means the
/// pair is not tradable yet.
pub trait ExchangeGateway: Send + Sync {
    /// Available balance of `asset` in the given account ledger.
    fn get_balance(
        &self,
        asset: &str,
        account_type: AccountType,
    ) -> BoxFuture<'_, GatewayResult<Option<Decimal>>>;

    /// Top-of-book for `symbol`, if the pair is trading.
    fn get_ticker(&self, symbol: &str) -> BoxFuture<'_, GatewayResult<Option<Ticker>>>;

    /// Place a limit sell order, returning the exchange order id.
    fn place_limit_sell(
        &self,
        symbol: &str,
        price: Price,
        quantity: Quantity,
    ) -> BoxFuture<'_, GatewayResult<OrderId>>;

    /// Cancel an open order.
    fn cancel_order(&self, order_id: &OrderId) -> BoxFuture<'_, GatewayResult<()>>;
}

/// Arc wrapper for gateway trait objects.
pub type DynGateway = Arc<dyn ExchangeGateway>;

/// Scripted gateway for tests.
///
/// Each method pops the next queued response for that endpoint; an empty
/// queue is a test bug and panics with the endpoint name.
#[derive(Default)]
pub struct MockGateway {
    balances: Mutex<VecDeque<GatewayResult<Option<Decimal>>>>,
    tickers: Mutex<VecDeque<GatewayResult<Option<Ticker>>>>,
    placements: Mutex<VecDeque<GatewayResult<OrderId>>>,
    cancels: Mutex<VecDeque<GatewayResult<()>>>,
    placed_orders: Mutex<Vec<(String, Price, Quantity)>>,
    cancelled_orders: Mutex<Vec<OrderId>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_balance(&self, response: GatewayResult<Option<Decimal>>) {
        self.balances.lock().push_back(response);
    }

    pub fn push_ticker(&self, response: GatewayResult<Option<Ticker>>) {
        self.tickers.lock().push_back(response);
    }

    pub fn push_placement(&self, response: GatewayResult<OrderId>) {
        self.placements.lock().push_back(response);
    }

    pub fn push_cancel(&self, response: GatewayResult<()>) {
        self.cancels.lock().push_back(response);
    }

    /// Orders recorded by `place_limit_sell`: (symbol, price, quantity).
    pub fn placed_orders(&self) -> Vec<(String, Price, Quantity)> {
        self.placed_orders.lock().clone()
    }

    /// Order ids passed to `cancel_order`.
    pub fn cancelled_orders(&self) -> Vec<OrderId> {
        self.cancelled_orders.lock().clone()
    }
}

impl ExchangeGateway for MockGateway {
    fn get_balance(
        &self,
        _asset: &str,
        _account_type: AccountType,
    ) -> BoxFuture<'_, GatewayResult<Option<Decimal>>> {
        Box::pin(async move {
            self.balances
                .lock()
                .pop_front()
                .expect("MockGateway: no scripted balance response")
        })
    }

    fn get_ticker(&self, _symbol: &str) -> BoxFuture<'_, GatewayResult<Option<Ticker>>> {
        Box::pin(async move {
            self.tickers
                .lock()
                .pop_front()
                .expect("MockGateway: no scripted ticker response")
        })
    }

    fn place_limit_sell(
        &self,
        symbol: &str,
        price: Price,
        quantity: Quantity,
    ) -> BoxFuture<'_, GatewayResult<OrderId>> {
        self.placed_orders
            .lock()
            .push((symbol.to_string(), price, quantity));
        Box::pin(async move {
            self.placements
                .lock()
                .pop_front()
                .expect("MockGateway: no scripted placement response")
        })
    }

    fn cancel_order(&self, order_id: &OrderId) -> BoxFuture<'_, GatewayResult<()>> {
        self.cancelled_orders.lock().push(order_id.clone());
        Box::pin(async move {
            self.cancels
                .lock()
                .pop_front()
                .expect("MockGateway: no scripted cancel response")
        })
    }
}

impl std::fmt::Debug for MockGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGateway")
            .field("placed_orders", &self.placed_orders.lock().len())
            .field("cancelled_orders", &self.cancelled_orders.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_gateway_pops_in_order() {
        let mock = MockGateway::new();
        mock.push_ticker(Ok(None));
        mock.push_ticker(Ok(Some(Ticker::new(Price::new(dec!(1.5))))));

        assert!(mock.get_ticker("ABC-USDT").await.unwrap().is_none());
        let ticker = mock.get_ticker("ABC-USDT").await.unwrap().unwrap();
        assert_eq!(ticker.best_bid, Price::new(dec!(1.5)));
    }

    #[tokio::test]
    async fn test_mock_gateway_records_placements() {
        let mock = MockGateway::new();
        mock.push_placement(Ok(OrderId::new("oid-1")));

        let oid = mock
            .place_limit_sell("ABC-USDT", Price::new(dec!(1.01)), Quantity::new(dec!(100)))
            .await
            .unwrap();
        assert_eq!(oid.as_str(), "oid-1");

        let placed = mock.placed_orders();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].0, "ABC-USDT");
    }

    #[tokio::test]
    #[should_panic(expected = "no scripted balance response")]
    async fn test_mock_gateway_panics_on_unscripted_call() {
        let mock = MockGateway::new();
        let _ = mock.get_balance("ABC", AccountType::Trade).await;
    }
}
