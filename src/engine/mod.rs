//! Quote Synchronization Engine
//!
//! Keeps a displayed trade quote consistent with fast-changing user input
//! and market state while tolerating out-of-order asynchronous responses:
//! debounced input, generation-sequenced requests, linked amount fields,
//! and TTL-based quote freshness.

pub mod config;
pub mod debounce;
pub mod freshness;
pub mod linker;
pub mod polling;
pub mod sequencer;
pub mod session;

// Re-export the engine surface
pub use config::SessionConfig;
pub use debounce::Debouncer;
pub use freshness::QuoteStamp;
pub use linker::{disabled_field, link_amounts};
pub use polling::{spawn_balance_poller, spawn_freshness_watchdog, spawn_pool_poller, BalanceBook};
pub use sequencer::{Generation, RequestSequencer};
pub use session::QuoteSession;
