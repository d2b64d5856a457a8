use crate::domain::model::order::OrderReceipt;
use crate::domain::model::quote::Quote;

/// Events the session emits for the UI layer to render.
///
/// Stale-response discards are intentionally absent: per the sequencing
/// contract they are dropped silently and only logged at debug level.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A fresh quote was accepted and now drives the displayed preview.
    QuoteUpdated(Quote),

    /// The displayed quote was cleared (reset, side change, invalid input).
    QuoteCleared,

    /// A stale quote is being refreshed before submission.
    RefreshingStaleQuote,

    /// The forced pre-submission re-quote moved the output beyond the
    /// configured threshold. Non-blocking: submission proceeds.
    DeviationWarning {
        previous_out: f64,
        refreshed_out: f64,
        deviation_pct: f64,
    },

    /// Input failed validation before any network call. Inline message.
    ValidationFailed(String),

    /// A backend failure mapped to a user-facing toast message.
    Toast(String),

    /// The order was accepted by the exchange.
    OrderSubmitted(OrderReceipt),
}
