//! KuCoin REST gateway.
//!
//! Implements `ExchangeGateway` over KuCoin's v1 order-management API:
//! balance lookup, level-1 ticker, limit order placement, cancellation.
//! All requests are signed; the client carries explicit connect/request
//! timeouts and an optional per-account proxy.

use std::time::Duration;

use reqwest::{Client, Method};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sniper_core::{AccountType, OrderId, Price, Quantity, Ticker};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{KucoinCredentials, RequestSigner};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{BoxFuture, ExchangeGateway};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.kucoin.com";

/// Connect timeout for the underlying HTTP client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// API envelope code for success.
const SUCCESS_CODE: &str = "200000";

/// API envelope code for cancel of a missing order.
const ORDER_NOT_EXIST_CODE: &str = "400100";

/// Response envelope wrapping every KuCoin API payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: String,
    data: Option<T>,
    #[serde(default)]
    msg: Option<String>,
}

impl<T> Envelope<T> {
    fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    fn message(&self) -> String {
        self.msg.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct AccountEntry {
    balance: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Level1Ticker {
    #[serde(default)]
    best_bid: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderRequest<'a> {
    /// Unique id for idempotent placement across retries.
    client_oid: String,
    side: &'a str,
    symbol: &'a str,
    #[serde(rename = "type")]
    order_type: &'a str,
    price: String,
    size: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderResponse {
    order_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelOrderResponse {
    #[serde(default)]
    #[allow(dead_code)]
    cancelled_order_ids: Vec<String>,
}

/// KuCoin REST client bound to one account's credentials.
pub struct KucoinGateway {
    client: Client,
    base_url: String,
    signer: RequestSigner,
}

impl KucoinGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    /// * `base_url` - API endpoint (e.g. [`DEFAULT_BASE_URL`])
    /// * `credentials` - per-account API key/secret/passphrase
    /// * `proxy` - optional outbound proxy URL for this account
    /// * `timeout` - total per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        credentials: KucoinCredentials,
        proxy: Option<&str>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout);

        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| GatewayError::Http(format!("invalid proxy {proxy_url}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| GatewayError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer: RequestSigner::new(credentials),
        })
    }

    /// Send a signed request and parse the envelope.
    ///
    /// KuCoin returns the `{code, data, msg}` envelope on error statuses
    /// too, so the body is parsed regardless of the HTTP status and the
    /// caller maps non-success codes per endpoint.
    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> GatewayResult<Envelope<T>> {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let body_str = body.as_deref().unwrap_or("");
        let signature = self
            .signer
            .sign(timestamp_ms, method.as_str(), path, body_str);

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .header("KC-API-KEY", self.signer.api_key())
            .header("KC-API-SIGN", signature)
            .header("KC-API-TIMESTAMP", timestamp_ms.to_string())
            .header("KC-API-PASSPHRASE", self.signer.signed_passphrase())
            .header("KC-API-KEY-VERSION", "2");

        if let Some(json) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(json);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Http(format!("failed to read response body: {e}")))?;

        serde_json::from_str::<Envelope<T>>(&text).map_err(|e| {
            if status.is_success() {
                GatewayError::Parse(format!("unexpected response shape: {e}"))
            } else {
                GatewayError::Http(format!("HTTP {status}: {text}"))
            }
        })
    }

    async fn fetch_balance(
        &self,
        asset: &str,
        account_type: AccountType,
    ) -> GatewayResult<Option<Decimal>> {
        let path = format!("/api/v1/accounts?currency={asset}&type={account_type}");
        let envelope: Envelope<Vec<AccountEntry>> =
            self.send_signed(Method::GET, &path, None).await?;

        if !envelope.is_success() {
            return Err(GatewayError::Api {
                message: envelope.message(),
                code: envelope.code,
            });
        }

        let accounts = envelope.data.unwrap_or_default();
        let Some(entry) = accounts.first() else {
            debug!(asset, "No account entry for asset");
            return Ok(None);
        };

        let balance: Decimal = entry
            .balance
            .parse()
            .map_err(|e| GatewayError::Parse(format!("bad balance {:?}: {e}", entry.balance)))?;

        debug!(asset, %balance, "Fetched balance");
        Ok(Some(balance))
    }

    async fn fetch_ticker(&self, symbol: &str) -> GatewayResult<Option<Ticker>> {
        let path = format!("/api/v1/market/orderbook/level1?symbol={symbol}");
        let envelope: Envelope<Level1Ticker> = self.send_signed(Method::GET, &path, None).await?;

        if !envelope.is_success() {
            return Err(GatewayError::Api {
                message: envelope.message(),
                code: envelope.code,
            });
        }

        // data is null until the pair starts trading; bestBid can also be
        // null for a book with no bids yet.
        let Some(ticker) = envelope.data else {
            return Ok(None);
        };
        let Some(best_bid) = ticker.best_bid.filter(|b| !b.is_empty()) else {
            return Ok(None);
        };

        let best_bid: Price = best_bid
            .parse()
            .map_err(|e| GatewayError::Parse(format!("bad bestBid {best_bid:?}: {e}")))?;

        Ok(Some(Ticker::new(best_bid)))
    }

    async fn submit_limit_sell(
        &self,
        symbol: &str,
        price: Price,
        quantity: Quantity,
    ) -> GatewayResult<OrderId> {
        let request = PlaceOrderRequest {
            client_oid: Uuid::new_v4().to_string(),
            side: "sell",
            symbol,
            order_type: "limit",
            price: price.to_string(),
            size: quantity.to_string(),
        };
        let body = serde_json::to_string(&request)?;

        let envelope: Envelope<PlaceOrderResponse> = self
            .send_signed(Method::POST, "/api/v1/orders", Some(body))
            .await?;

        if !envelope.is_success() {
            warn!(
                code = %envelope.code,
                msg = %envelope.message(),
                symbol,
                "Order placement rejected"
            );
            return Err(GatewayError::Rejected {
                message: envelope.message(),
                code: envelope.code,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| GatewayError::Parse("order response missing orderId".to_string()))?;

        debug!(order_id = %data.order_id, symbol, %price, %quantity, "Order placed");
        Ok(OrderId::new(data.order_id))
    }

    async fn submit_cancel(&self, order_id: &OrderId) -> GatewayResult<()> {
        let path = format!("/api/v1/orders/{order_id}");
        let envelope: Envelope<CancelOrderResponse> =
            self.send_signed(Method::DELETE, &path, None).await?;

        if envelope.is_success() {
            return Ok(());
        }

        let message = envelope.message();
        if envelope.code == ORDER_NOT_EXIST_CODE || message.contains("order_not_exist") {
            return Err(GatewayError::OrderNotFound(order_id.to_string()));
        }

        Err(GatewayError::Api {
            code: envelope.code,
            message,
        })
    }
}

impl ExchangeGateway for KucoinGateway {
    fn get_balance(
        &self,
        asset: &str,
        account_type: AccountType,
    ) -> BoxFuture<'_, GatewayResult<Option<Decimal>>> {
        let asset = asset.to_string();
        Box::pin(async move { self.fetch_balance(&asset, account_type).await })
    }

    fn get_ticker(&self, symbol: &str) -> BoxFuture<'_, GatewayResult<Option<Ticker>>> {
        let symbol = symbol.to_string();
        Box::pin(async move { self.fetch_ticker(&symbol).await })
    }

    fn place_limit_sell(
        &self,
        symbol: &str,
        price: Price,
        quantity: Quantity,
    ) -> BoxFuture<'_, GatewayResult<OrderId>> {
        let symbol = symbol.to_string();
        Box::pin(async move { self.submit_limit_sell(&symbol, price, quantity).await })
    }

    fn cancel_order(&self, order_id: &OrderId) -> BoxFuture<'_, GatewayResult<()>> {
        let order_id = order_id.clone();
        Box::pin(async move { self.submit_cancel(&order_id).await })
    }
}
