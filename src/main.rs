// Standard library imports
use std::path::Path;
use std::sync::Arc;

// External crate imports
use anyhow::Result;
use dotenv::dotenv;
use log::{debug, error, info, warn};
use tokio::select;
use tokio::sync::broadcast;
use tokio::time::{sleep, timeout, Duration};

// Internal crate imports
use quotesync::config_loader::AppConfig;
use quotesync::domain::events::SessionEvent;
use quotesync::engine::{
    spawn_balance_poller, spawn_freshness_watchdog, spawn_pool_poller, BalanceBook, QuoteSession,
};
use quotesync::infrastructure::gateway::HttpGateway;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();
    info!("Logger initialized");

    // Load configuration from TOML file (first try relative path, then local path as backup)
    let config_path = Path::new("../config.toml");
    let config = match AppConfig::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);

            let alt_path = Path::new("./config.toml");
            info!("Attempting to load from alternate path: {}", alt_path.display());
            AppConfig::from_file(alt_path)?
        }
    };

    let config = Arc::new(config);
    info!("Configuration loaded, market: {}", config.market.name);

    run_engine(config).await
}

/// Main engine run function
async fn run_engine(config: Arc<AppConfig>) -> Result<()> {
    // Set up signal handler for SIGINT (Ctrl+C)
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    loop {
        info!("Starting quoting session for {}", config.market.name);

        let gateway = Arc::new(HttpGateway::new(
            &config.gateway.endpoint,
            config.request_timeout(),
            config.gateway.max_retries,
        )?);

        let (session, events) = QuoteSession::new(
            gateway.clone(),
            config.market.to_market(),
            config.session_config(),
        );

        // Seed the form with the configured demo amount
        if let Some(amount) = &config.app.demo_amount {
            session.edit_amount(amount).await;
        }

        let (shutdown_tx, _) = broadcast::channel::<()>(4);
        let should_exit = run_tasks(
            session.clone(),
            gateway,
            events,
            config.clone(),
            shutdown_tx,
            &mut sigint,
        )
        .await?;

        info!("Running cleanup...");
        cleanup(session).await;

        if should_exit {
            info!("Exiting program");
            break;
        }

        sleep(Duration::from_secs(1)).await;
        warn!("Restarting engine session...");
    }

    Ok(())
}

/// Run the engine's background tasks until one fails or SIGINT arrives
async fn run_tasks(
    session: Arc<QuoteSession<HttpGateway>>,
    gateway: Arc<HttpGateway>,
    mut events: tokio::sync::mpsc::UnboundedReceiver<SessionEvent>,
    config: Arc<AppConfig>,
    shutdown_tx: broadcast::Sender<()>,
    sigint: &mut tokio::signal::unix::Signal,
) -> Result<bool> {
    let balance_book = Arc::new(BalanceBook::new());

    let mut pool_handle = spawn_pool_poller(
        session.clone(),
        config.pool_poll_interval(),
        shutdown_tx.subscribe(),
    );
    let mut freshness_handle = spawn_freshness_watchdog(session.clone(), shutdown_tx.subscribe());
    let mut balance_handle = spawn_balance_poller(
        gateway,
        config.app.account.clone(),
        balance_book,
        config.balance_poll_interval(),
        shutdown_tx.subscribe(),
    );

    // Surface session events in the log the way a UI would render them
    let mut events_handle = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::QuoteUpdated(quote) => {
                    info!(
                        "quote: {} in -> {} out (impact {:.2}%, fees {:.6}, book {} / pool {})",
                        quote.amount_in,
                        quote.amount_out,
                        quote.price_impact_pct,
                        quote.fees.total(),
                        quote.book_volume(),
                        quote.pool_volume()
                    );
                }
                SessionEvent::QuoteCleared => debug!("quote cleared"),
                SessionEvent::RefreshingStaleQuote => info!("refreshing stale quote"),
                SessionEvent::DeviationWarning {
                    previous_out,
                    refreshed_out,
                    deviation_pct,
                } => {
                    warn!(
                        "quote moved while you were away: {} -> {} ({:.2}%)",
                        previous_out, refreshed_out, deviation_pct
                    );
                }
                SessionEvent::ValidationFailed(message) => warn!("validation: {}", message),
                SessionEvent::Toast(message) => warn!("toast: {}", message),
                SessionEvent::OrderSubmitted(receipt) => {
                    info!("order {} submitted ({:?})", receipt.order_id, receipt.status);
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    });

    let mut should_exit = false;

    // Wait for any task to finish or a termination signal
    select! {
        res = &mut pool_handle => log_task_exit("pool poller", res),
        res = &mut freshness_handle => log_task_exit("freshness watchdog", res),
        res = &mut balance_handle => log_task_exit("balance poller", res),
        res = &mut events_handle => log_task_exit("event logger", res),
        _ = sigint.recv() => {
            warn!("SIGINT (Ctrl+C) received. Attempting graceful shutdown...");
            should_exit = true;
        }
    }

    // Signal all tasks to shut down
    if let Err(e) = shutdown_tx.send(()) {
        error!("Failed to send shutdown signal: {}", e);
    } else {
        info!("Shutdown signal sent to all tasks");
    }

    // Give tasks a moment to process the shutdown signal
    sleep(Duration::from_millis(100)).await;

    for (name, handle) in [
        ("pool", &mut pool_handle),
        ("freshness", &mut freshness_handle),
        ("balance", &mut balance_handle),
        ("events", &mut events_handle),
    ] {
        if !handle.is_finished() {
            info!("Aborting {} task", name);
            handle.abort();
        }
    }

    Ok(should_exit)
}

fn log_task_exit(name: &str, res: std::result::Result<Result<()>, tokio::task::JoinError>) {
    match res {
        Ok(Ok(())) => info!("{} completed successfully", name),
        Ok(Err(e)) => error!("{} returned error: {:?}", name, e),
        Err(e) => error!("{} panicked: {:?}", name, e),
    }
}

async fn cleanup(session: Arc<QuoteSession<HttpGateway>>) {
    // Teardown must not hang shutdown
    match timeout(Duration::from_secs(5), session.teardown()).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => error!("Cleanup timed out after 5 seconds"),
    }
}
