// Default timings for the quote synchronization engine
use tokio::time::Duration;

pub const DEBOUNCE_MS: u64 = 500;
pub const QUOTE_TTL_SECS: u64 = 15;
pub const DEVIATION_WARN_PCT: f64 = 1.0;
pub const FRESHNESS_TICK_SECS: u64 = 1;
pub const POOL_POLL_SECS: u64 = 5;
pub const BALANCE_POLL_SECS: u64 = 10;

/// Timing knobs for one form session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Delay between the last input edit and the quote computation.
    pub debounce: Duration,
    /// Lifetime of an accepted quote.
    pub quote_ttl: Duration,
    /// Output drift (percent) beyond which a pre-submission re-quote
    /// surfaces a warning.
    pub deviation_warn_pct: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            quote_ttl: Duration::from_secs(QUOTE_TTL_SECS),
            deviation_warn_pct: DEVIATION_WARN_PCT,
        }
    }
}
