//! The seller driver.
//!
//! Drives one account through the wait → balance-check → price-check →
//! place-order → monitor → cancel-or-complete sequence. Each `step` call
//! performs at most one gateway round-trip and returns the next state, so
//! every transition is individually testable; `run` loops until terminal.

use sniper_core::{AccountContext, AccountType, OrderId, Price, Quantity, SaleResult};
use sniper_gateway::{DynGateway, GatewayError};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::SellerConfig;
use crate::error::{SellerError, SellerResult};
use crate::state::SellerState;

/// Sells one account's balance of the target asset at listing time.
pub struct Seller<C: Clock> {
    gateway: DynGateway,
    clock: C,
    config: SellerConfig,
    ctx: AccountContext,
    reprice_attempts: u32,
    /// Last whole second a countdown line was logged for.
    last_countdown_log: Option<u64>,
}

impl<C: Clock> Seller<C> {
    pub fn new(
        account_name: impl Into<String>,
        gateway: DynGateway,
        clock: C,
        config: SellerConfig,
    ) -> Self {
        Self {
            gateway,
            clock,
            config,
            ctx: AccountContext::new(account_name),
            reprice_attempts: 0,
            last_countdown_log: None,
        }
    }

    pub fn context(&self) -> &AccountContext {
        &self.ctx
    }

    /// Run to completion.
    ///
    /// Returns the account context together with the single sale result.
    /// Exactly one result is ever produced per run.
    pub async fn run(mut self) -> SellerResult<(AccountContext, SaleResult)> {
        let mut state = SellerState::Waiting;
        loop {
            state = self.step(state).await?;
            if let SellerState::Completed(result) = state {
                return Ok((self.ctx, result));
            }
        }
    }

    /// Advance the state machine by one transition.
    pub async fn step(&mut self, state: SellerState) -> SellerResult<SellerState> {
        match state {
            SellerState::Waiting => self.wait_for_listing().await,
            SellerState::CheckingBalance => self.check_balance().await,
            SellerState::CheckingPrice { balance } => self.check_price(balance).await,
            SellerState::Selling { balance, price } => self.sell(balance, price).await,
            SellerState::MonitoringOrder {
                balance,
                order_id,
                price,
            } => self.monitor_order(balance, order_id, price).await,
            SellerState::Cancelling {
                balance,
                order_id,
                price,
            } => self.cancel_order(balance, order_id, price).await,
            terminal @ SellerState::Completed(_) => Ok(terminal),
        }
    }

    /// Waiting: poll the clock until the listing timestamp is reached,
    /// logging the countdown at most once per whole second.
    async fn wait_for_listing(&mut self) -> SellerResult<SellerState> {
        let now_s = self.clock.now_ms() / 1000;
        if now_s >= self.config.list_time {
            info!(
                account = self.ctx.account_name(),
                coin = %self.config.coin,
                "Listing time reached"
            );
            return Ok(SellerState::CheckingBalance);
        }

        if self.last_countdown_log != Some(now_s) {
            info!(
                remaining_secs = self.config.list_time - now_s,
                "Waiting for listing"
            );
            self.last_countdown_log = Some(now_s);
        }

        self.clock.sleep(self.config.poll_interval()).await;
        Ok(SellerState::Waiting)
    }

    /// CheckingBalance: a missing or sub-unit balance is a configuration
    /// error, fatal for the whole run.
    async fn check_balance(&mut self) -> SellerResult<SellerState> {
        let raw = self
            .gateway
            .get_balance(&self.config.coin, AccountType::Trade)
            .await?;

        let balance = raw
            .map(|b| Quantity::new(b).floor_units())
            .filter(|b| !b.is_zero())
            .ok_or_else(|| SellerError::NoBalance {
                asset: self.config.coin.clone(),
            })?;

        self.ctx.record_balance_before(balance);
        info!(
            account = self.ctx.account_name(),
            coin = %self.config.coin,
            balance = %balance,
            "Balance available for selling"
        );
        Ok(SellerState::CheckingPrice { balance })
    }

    /// CheckingPrice: poll the ticker until the pair trades at or above
    /// the configured floor.
    async fn check_price(&mut self, balance: Quantity) -> SellerResult<SellerState> {
        let Some(ticker) = self.gateway.get_ticker(&self.config.symbol()).await? else {
            info!(symbol = %self.config.symbol(), "No orders on the book yet");
            self.clock.sleep(self.config.poll_interval()).await;
            return Ok(SellerState::CheckingPrice { balance });
        };

        let price = Price::from_best_bid(
            ticker.best_bid,
            self.config.coefficient,
            self.config.price_decimals,
        );

        if price < self.config.min_price {
            info!(
                %price,
                min_price = %self.config.min_price,
                "Computed price below floor"
            );
            self.clock.sleep(self.config.poll_interval()).await;
            return Ok(SellerState::CheckingPrice { balance });
        }

        Ok(SellerState::Selling { balance, price })
    }

    /// Selling: place the limit order for the full balance, floored to the
    /// exchange lot size. A rejection sends the machine back to repricing.
    async fn sell(&mut self, balance: Quantity, price: Price) -> SellerResult<SellerState> {
        let quantity = balance.floor_to(self.config.quantity_decimals);

        match self
            .gateway
            .place_limit_sell(&self.config.symbol(), price, quantity)
            .await
        {
            Ok(order_id) => {
                info!(
                    account = self.ctx.account_name(),
                    %order_id,
                    %quantity,
                    %price,
                    "Limit sell order placed"
                );
                Ok(SellerState::MonitoringOrder {
                    balance,
                    order_id,
                    price,
                })
            }
            Err(GatewayError::Rejected { code, message }) => {
                warn!(%code, %message, "Order rejected, recomputing price");
                self.note_reprice()?;
                Ok(SellerState::CheckingPrice { balance })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// MonitoringOrder: the order counts as filled once the remaining
    /// balance is down to dust.
    async fn monitor_order(
        &mut self,
        _balance: Quantity,
        order_id: OrderId,
        price: Price,
    ) -> SellerResult<SellerState> {
        let raw = self
            .gateway
            .get_balance(&self.config.coin, AccountType::Trade)
            .await?;
        let remaining = Quantity::new(raw.unwrap_or_default()).floor_units();

        if remaining <= self.config.dust_threshold {
            self.ctx.record_balance_after(remaining);
            info!(
                account = self.ctx.account_name(),
                residual = %remaining,
                "Completed"
            );
            return Ok(SellerState::Completed(SaleResult::new(
                order_id, remaining, price,
            )));
        }

        Ok(SellerState::Cancelling {
            balance: remaining,
            order_id,
            price,
        })
    }

    /// Cancelling: a missing cancel target means the order filled in the
    /// window between the monitor check and the cancel attempt.
    async fn cancel_order(
        &mut self,
        balance: Quantity,
        order_id: OrderId,
        price: Price,
    ) -> SellerResult<SellerState> {
        match self.gateway.cancel_order(&order_id).await {
            Ok(()) => {
                info!(
                    account = self.ctx.account_name(),
                    %order_id,
                    "Order cancelled, retrying with a fresh price"
                );
                self.note_reprice()?;
                Ok(SellerState::CheckingPrice { balance })
            }
            Err(GatewayError::OrderNotFound(_)) => {
                self.ctx.record_balance_after(balance);
                info!(
                    account = self.ctx.account_name(),
                    %order_id,
                    "Order already filled"
                );
                Ok(SellerState::Completed(SaleResult::new(
                    order_id, balance, price,
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn note_reprice(&mut self) -> SellerResult<()> {
        self.reprice_attempts += 1;
        let max = self.config.max_reprice_attempts;
        if max > 0 && self.reprice_attempts > max {
            return Err(SellerError::RepriceExhausted {
                attempts: self.reprice_attempts,
            });
        }
        Ok(())
    }
}
