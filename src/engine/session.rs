use std::sync::{Arc, Weak};

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex, RwLock};

use crate::domain::enums::{EditedField, OrderType, SessionState, Side};
use crate::domain::error::EngineError;
use crate::domain::events::SessionEvent;
use crate::domain::model::amounts::{parse_amount, AmountPair};
use crate::domain::model::market::{Market, PoolState};
use crate::domain::model::order::{Denomination, OrderReceipt, OrderRequest, QuoteRequest};
use crate::domain::model::quote::Quote;
use crate::domain::model::tick::align_to_spacing;
use crate::domain::traits::DexGateway;

use super::config::SessionConfig;
use super::debounce::Debouncer;
use super::freshness::QuoteStamp;
use super::linker::{disabled_field, link_amounts};
use super::sequencer::RequestSequencer;

/// One order-entry form's quoting session.
///
/// Owns the debounce timer, the request sequencer, the linked amount pair,
/// and the accepted quote with its freshness stamp. All mutation happens
/// through `&self` behind locks so the session can be shared between the
/// caller, the debounce task, and the polling tasks.
pub struct QuoteSession<G: DexGateway> {
    pub gateway: Arc<G>,
    pub market: Market,
    pub config: SessionConfig,

    pub side: RwLock<Side>,
    pub order_type: RwLock<OrderType>,
    pub amounts: RwLock<AmountPair>,
    pub pool: RwLock<Option<PoolState>>,
    pub quote: RwLock<Option<(Quote, QuoteStamp)>>,
    pub state: RwLock<SessionState>,

    pub sequencer: RequestSequencer,
    debounce: Mutex<Debouncer>,
    events: mpsc::UnboundedSender<SessionEvent>,
    // Handle to ourselves for the debounce task; set once in `new`.
    weak: Weak<Self>,
}

impl<G: DexGateway> QuoteSession<G> {
    pub fn new(
        gateway: Arc<G>,
        market: Market,
        config: SessionConfig,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let debounce = Debouncer::new(config.debounce);

        let session = Arc::new_cyclic(|weak| Self {
            gateway,
            market,
            config,
            side: RwLock::new(Side::Buy),
            order_type: RwLock::new(OrderType::Market),
            amounts: RwLock::new(AmountPair::new()),
            pool: RwLock::new(None),
            quote: RwLock::new(None),
            state: RwLock::new(SessionState::Idle),
            sequencer: RequestSequencer::new(),
            debounce: Mutex::new(debounce),
            events,
            weak: weak.clone(),
        });

        (session, receiver)
    }

    fn emit(&self, event: SessionEvent) {
        // A dropped receiver just means no UI is listening anymore.
        let _ = self.events.send(event);
    }

    async fn set_state(&self, next: SessionState) {
        *self.state.write().await = next;
    }

    pub async fn current_state(&self) -> SessionState {
        *self.state.read().await
    }

    pub async fn current_quote(&self) -> Option<Quote> {
        self.quote.read().await.as_ref().map(|(quote, _)| quote.clone())
    }

    /// User edited the base-amount field.
    pub async fn edit_amount(&self, value: &str) {
        self.edit_field(EditedField::Amount, value).await;
    }

    /// User edited the quote-total field.
    pub async fn edit_total(&self, value: &str) {
        self.edit_field(EditedField::Total, value).await;
    }

    async fn edit_field(&self, field: EditedField, value: &str) {
        {
            let pool = self.pool.read().await.clone();
            let mut amounts = self.amounts.write().await;
            amounts.record_edit(field, value);
            if let Some(pool) = pool.as_ref() {
                link_amounts(&mut amounts, &self.market, pool);
            }
        }

        self.set_state(SessionState::Debouncing).await;

        let Some(session) = self.weak.upgrade() else {
            return;
        };
        self.debounce.lock().await.schedule(async move {
            session.refresh_quote().await;
        });
    }

    /// Switching side resets the linked amounts and any displayed quote.
    pub async fn set_side(&self, side: Side) {
        *self.side.write().await = side;
        self.reset().await;
    }

    pub async fn set_order_type(&self, order_type: OrderType) {
        *self.order_type.write().await = order_type;
        self.reset().await;
    }

    /// Builds the pricing request from current form state, re-validating
    /// the edited input.
    async fn build_quote_request(&self) -> Result<QuoteRequest, EngineError> {
        let amounts = self.amounts.read().await;
        let field = amounts.last_edited.ok_or(EngineError::MissingAmount)?;
        let value = parse_amount(amounts.field(field))?;

        Ok(QuoteRequest {
            market: self.market.name.clone(),
            side: *self.side.read().await,
            amount: value,
            denomination: Denomination::from(field),
        })
    }

    /// Fetches a quote for the current input. A response that lost the
    /// generation race is dropped here without surfacing anything.
    pub async fn refresh_quote(&self) {
        let request = match self.build_quote_request().await {
            Ok(request) => request,
            Err(_) => {
                // Input went invalid while the debounce timer was pending.
                self.clear_quote().await;
                return;
            }
        };

        let generation = self.sequencer.issue();
        self.set_state(SessionState::Quoting).await;

        let result = self.gateway.fetch_quote(&request).await;

        if !self.sequencer.is_current(generation) {
            debug!("discarding quote response for superseded generation {:?}", generation);
            return;
        }

        match result {
            Ok(quote) => self.accept_quote(quote).await,
            Err(e) => {
                warn!("quote fetch failed: {}", e);
                self.emit(SessionEvent::Toast(e.user_message()));
                self.set_state(SessionState::Error).await;
            }
        }
    }

    async fn accept_quote(&self, quote: Quote) {
        info!(
            "quote accepted: {} {} {} in -> {} out",
            quote.market,
            quote.side.as_str(),
            quote.amount_in,
            quote.amount_out
        );
        *self.quote.write().await = Some((quote.clone(), QuoteStamp::now()));
        self.set_state(SessionState::Quoted).await;
        self.emit(SessionEvent::QuoteUpdated(quote));
    }

    async fn clear_quote(&self) {
        self.sequencer.invalidate();
        *self.quote.write().await = None;
        self.set_state(SessionState::Idle).await;
        self.emit(SessionEvent::QuoteCleared);
    }

    /// Guarantees a fresh quote before submission. A stale quote forces a
    /// synchronous re-quote; output drift beyond the configured threshold
    /// surfaces a non-blocking warning and submission proceeds with the
    /// new quote.
    pub async fn ensure_fresh(&self) -> Result<Quote> {
        let (previous, stamp) = self
            .quote
            .read()
            .await
            .clone()
            .ok_or_else(|| anyhow!(EngineError::MissingQuote))?;

        if stamp.is_fresh(self.config.quote_ttl) {
            return Ok(previous);
        }

        self.emit(SessionEvent::RefreshingStaleQuote);
        self.set_state(SessionState::Stale).await;

        let request = self.build_quote_request().await?;
        let generation = self.sequencer.issue();
        self.set_state(SessionState::Quoting).await;

        let quote = match self.gateway.fetch_quote(&request).await {
            Ok(quote) => quote,
            Err(e) => {
                self.emit(SessionEvent::Toast(e.user_message()));
                return Err(anyhow!(e));
            }
        };

        if !self.sequencer.is_current(generation) {
            debug!("pre-submission re-quote superseded; using the newer quote");
            return self
                .quote
                .read()
                .await
                .as_ref()
                .map(|(quote, _)| quote.clone())
                .ok_or_else(|| anyhow!(EngineError::MissingQuote));
        }

        let deviation = quote.output_deviation_pct(&previous);
        if deviation > self.config.deviation_warn_pct {
            warn!("pre-submission re-quote moved output by {:.2}%", deviation);
            self.emit(SessionEvent::DeviationWarning {
                previous_out: previous.amount_out,
                refreshed_out: quote.amount_out,
                deviation_pct: deviation,
            });
        }

        self.accept_quote(quote.clone()).await;
        Ok(quote)
    }

    /// Validates, guarantees quote freshness, and submits the order.
    /// Validation failures surface as events and return `Ok(None)`; the
    /// session stays recoverable after every failure path.
    pub async fn submit(&self) -> Result<Option<OrderReceipt>> {
        if let Err(e) = self.build_quote_request().await {
            self.emit(SessionEvent::ValidationFailed(e.to_string()));
            return Ok(None);
        }

        let quote = match self.ensure_fresh().await {
            Ok(quote) => quote,
            Err(e) => {
                self.set_state(SessionState::Error).await;
                return Err(e);
            }
        };

        self.set_state(SessionState::Submitting).await;
        let request = self.build_order_request(&quote).await?;

        match self.gateway.submit_order(&request).await {
            Ok(receipt) => {
                info!("order {} accepted with status {:?}", receipt.order_id, receipt.status);
                self.emit(SessionEvent::OrderSubmitted(receipt.clone()));
                self.reset().await;
                Ok(Some(receipt))
            }
            Err(e) => {
                warn!("order submission failed: {}", e);
                self.emit(SessionEvent::Toast(e.user_message()));
                self.set_state(SessionState::Error).await;
                Ok(None)
            }
        }
    }

    /// Assembles the submitted amounts, excluding a disabled side, and
    /// aligns the limit tick onto the market's spacing grid.
    async fn build_order_request(&self, quote: &Quote) -> Result<OrderRequest> {
        let amounts = self.amounts.read().await;
        let pool = self.pool.read().await;
        let disabled = pool.as_ref().and_then(disabled_field);

        let field_value = |field: EditedField| -> Option<f64> {
            if disabled == Some(field) {
                return None;
            }
            parse_amount(amounts.field(field)).ok()
        };
        let amount = field_value(EditedField::Amount);
        let total = field_value(EditedField::Total);

        let order_type = *self.order_type.read().await;
        let limit_tick = match order_type {
            OrderType::Limit => {
                Some(align_to_spacing(quote.effective_tick, self.market.tick_spacing)?)
            }
            OrderType::Market => None,
        };

        Ok(OrderRequest {
            market: self.market.name.clone(),
            side: *self.side.read().await,
            order_type,
            amount,
            total,
            limit_tick,
        })
    }

    /// Pool poller callback: refresh the reference tick and relink the
    /// amount pair against it.
    pub async fn on_pool_update(&self, pool: PoolState) {
        {
            let mut amounts = self.amounts.write().await;
            link_amounts(&mut amounts, &self.market, &pool);
        }
        *self.pool.write().await = Some(pool);
    }

    /// Freshness watchdog hook: drives `Quoted -> Stale -> Quoting` and the
    /// proactive midpoint refresh.
    pub async fn tick_freshness(&self) {
        let flags = self.quote.read().await.as_ref().map(|(_, stamp)| {
            (
                stamp.is_fresh(self.config.quote_ttl),
                stamp.needs_proactive_refresh(self.config.quote_ttl),
            )
        });
        let Some((fresh, past_midpoint)) = flags else {
            return;
        };

        let state = self.current_state().await;
        if state != SessionState::Quoted && state != SessionState::Stale {
            return;
        }

        if !fresh {
            self.set_state(SessionState::Stale).await;
            self.refresh_quote().await;
        } else if past_midpoint {
            self.refresh_quote().await;
        }
    }

    /// Returns the form to Idle: clears amounts, quote, and pending work.
    pub async fn reset(&self) {
        self.debounce.lock().await.cancel();
        self.sequencer.invalidate();
        self.amounts.write().await.reset();
        *self.quote.write().await = None;
        self.set_state(SessionState::Idle).await;
        self.emit(SessionEvent::QuoteCleared);
    }

    /// Unmount: cancels scheduled work and invalidates every in-flight
    /// response so nothing lands after the form is gone.
    pub async fn teardown(&self) {
        self.debounce.lock().await.cancel();
        self.sequencer.invalidate();
        self.set_state(SessionState::Idle).await;
    }
}
