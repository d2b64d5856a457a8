use tokio::time::{Duration, Instant};

/// Acceptance timestamp of a displayed quote.
///
/// A quote is fresh while its age is under the TTL; past the TTL midpoint
/// it is flagged for a proactive pre-submission refresh.
#[derive(Clone, Copy, Debug)]
pub struct QuoteStamp {
    accepted_at: Instant,
}

impl QuoteStamp {
    pub fn now() -> Self {
        Self { accepted_at: Instant::now() }
    }

    pub fn age(&self) -> Duration {
        self.accepted_at.elapsed()
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    pub fn needs_proactive_refresh(&self, ttl: Duration) -> bool {
        self.age() >= ttl / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const TTL: Duration = Duration::from_secs(15);

    #[tokio::test(start_paused = true)]
    async fn fresh_until_ttl_elapses() {
        let stamp = QuoteStamp::now();
        assert!(stamp.is_fresh(TTL));

        advance(Duration::from_secs(14)).await;
        assert!(stamp.is_fresh(TTL));

        advance(Duration::from_secs(2)).await;
        assert!(!stamp.is_fresh(TTL));
    }

    #[tokio::test(start_paused = true)]
    async fn midpoint_flags_proactive_refresh() {
        let stamp = QuoteStamp::now();
        assert!(!stamp.needs_proactive_refresh(TTL));

        advance(Duration::from_secs(7)).await;
        assert!(!stamp.needs_proactive_refresh(TTL));

        advance(Duration::from_millis(1500)).await;
        assert!(stamp.needs_proactive_refresh(TTL));
        // Still fresh: the midpoint flag fires well before expiry.
        assert!(stamp.is_fresh(TTL));
    }
}
