use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::domain::error::GatewayError;
use crate::domain::model::market::PoolState;
use crate::domain::model::order::{OrderReceipt, OrderRequest, QuoteRequest};
use crate::domain::model::quote::Quote;
use crate::domain::traits::DexGateway;

use super::models::{OrderReceiptDto, PoolStateDto, QuoteDto};
use super::parsers::parse_envelope;

/// HTTP JSON-RPC client for the exchange backend.
///
/// Stateless per call: each request carries a unique id, transport
/// failures are retried with jittered backoff, rejections are not.
pub struct HttpGateway {
    endpoint: Url,
    http: Client,
    call_id: AtomicU64,
    max_retries: u32,
}

impl HttpGateway {
    pub fn new(
        endpoint: &str,
        request_timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, GatewayError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GatewayError::Transport(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint,
            http,
            call_id: AtomicU64::new(1),
            max_retries,
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, GatewayError> {
        let id = self.call_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "method": method,
            "params": params,
            "id": id,
        });

        let mut attempt = 0u32;
        loop {
            debug!("rpc {} id={} attempt={}", method, id, attempt);
            match self.send_once(&request).await {
                Ok(envelope) => return parse_envelope(envelope),
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    let backoff = backoff_with_jitter(attempt);
                    warn!("rpc {} failed ({}), retrying in {:?}", method, e, backoff);
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, request: &Value) -> Result<Value, GatewayError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!("http status {}", status)));
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}

// Rejections are final; only transport-level failures get another attempt.
fn is_retryable(e: &GatewayError) -> bool {
    matches!(e, GatewayError::Transport(_) | GatewayError::Timeout)
}

fn backoff_with_jitter(attempt: u32) -> Duration {
    let base = 100u64 << attempt.min(4);
    let jitter = rand::thread_rng().gen_range(0..=base / 2);
    Duration::from_millis(base + jitter)
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(e.to_string())
    }
}

#[async_trait]
impl DexGateway for HttpGateway {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, GatewayError> {
        let params = json!({
            "market": request.market,
            "side": request.side,
            "amount": request.amount,
            "denomination": request.denomination,
        });
        let dto: QuoteDto = self.call("exchange.quote", params).await?;
        Ok(dto.into_domain())
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderReceipt, GatewayError> {
        let params = json!({
            "market": request.market,
            "side": request.side,
            "order_type": request.order_type,
            "amount": request.amount,
            "total": request.total,
            "limit_tick": request.limit_tick,
            // Lets the backend dedupe a resubmitted order.
            "idempotency_key": Uuid::new_v4(),
        });
        let dto: OrderReceiptDto = self.call("exchange.create_order", params).await?;
        Ok(dto.into_domain())
    }

    async fn cancel_order(&self, market: &str, order_id: &str) -> Result<(), GatewayError> {
        let params = json!({ "market": market, "order_id": order_id });
        let _: Value = self.call("exchange.cancel_order", params).await?;
        Ok(())
    }

    async fn pool_state(&self, market: &str) -> Result<PoolState, GatewayError> {
        let dto: PoolStateDto = self.call("pool.state", json!({ "market": market })).await?;
        Ok(dto.into_domain())
    }

    async fn balances(&self, account: &str) -> Result<HashMap<String, f64>, GatewayError> {
        self.call("ledger.balances", json!({ "account": account })).await
    }
}
