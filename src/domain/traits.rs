use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::error::GatewayError;
use crate::domain::model::market::PoolState;
use crate::domain::model::order::{OrderReceipt, OrderRequest, QuoteRequest};
use crate::domain::model::quote::Quote;

/// Backend canister surface the engine talks to. Implemented over HTTP
/// JSON-RPC in production and by scripted fakes in tests.
#[async_trait]
pub trait DexGateway: Send + Sync + 'static {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, GatewayError>;

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderReceipt, GatewayError>;

    async fn cancel_order(&self, market: &str, order_id: &str) -> Result<(), GatewayError>;

    async fn pool_state(&self, market: &str) -> Result<PoolState, GatewayError>;

    async fn balances(&self, account: &str) -> Result<HashMap<String, f64>, GatewayError>;
}
