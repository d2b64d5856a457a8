// Fixed-interval background tasks owned by the engine runner. Every loop
// terminates on the shutdown broadcast; a failed poll logs and waits for
// the next tick.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

use crate::domain::traits::DexGateway;

use super::config::FRESHNESS_TICK_SECS;
use super::session::QuoteSession;

/// Task to keep the session's reference tick current.
pub fn spawn_pool_poller<G: DexGateway>(
    session: Arc<QuoteSession<G>>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match session.gateway.pool_state(&session.market.name).await {
                        Ok(pool) => {
                            debug!("pool update for {}: tick={:?}", session.market.name, pool.tick);
                            session.on_pool_update(pool).await;
                        }
                        Err(e) => {
                            // Next tick retries silently.
                            warn!("pool poll failed for {}: {}", session.market.name, e);
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("pool poller received shutdown signal");
                    return Ok(());
                }
            }
        }
    })
}

/// Task driving quote staleness transitions and the proactive refresh.
pub fn spawn_freshness_watchdog<G: DexGateway>(
    session: Arc<QuoteSession<G>>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(FRESHNESS_TICK_SECS));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    session.tick_freshness().await;
                }
                _ = shutdown.recv() => {
                    info!("freshness watchdog received shutdown signal");
                    return Ok(());
                }
            }
        }
    })
}

/// Latest known token balances for the signed-in account.
#[derive(Debug, Default)]
pub struct BalanceBook {
    pub balances: RwLock<HashMap<String, f64>>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, symbol: &str) -> Option<f64> {
        self.balances.read().await.get(symbol).copied()
    }

    pub async fn replace(&self, next: HashMap<String, f64>) {
        *self.balances.write().await = next;
    }
}

/// Task to auto-refresh the account balance sheet.
pub fn spawn_balance_poller<G: DexGateway>(
    gateway: Arc<G>,
    account: String,
    book: Arc<BalanceBook>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match gateway.balances(&account).await {
                        Ok(balances) => book.replace(balances).await,
                        Err(e) => {
                            warn!("balance poll failed for {}: {}", account, e);
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("balance poller received shutdown signal");
                    return Ok(());
                }
            }
        }
    })
}
