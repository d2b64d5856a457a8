use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one issued quote request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Monotonic generation counter guarding overlapping quote requests.
///
/// `issue()` is called before the asynchronous pricing call starts; on
/// completion the caller checks its captured token with `is_current()` and
/// drops the result if another request was issued in the meantime. The
/// winner is always the most-recently-issued request, regardless of
/// network completion order.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self { current: AtomicU64::new(0) }
    }

    /// Claims the next generation. The returned token stays valid until
    /// the next `issue()` or `invalidate()` call.
    pub fn issue(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::SeqCst) == generation.0
    }

    /// Bumps the counter without issuing, so every in-flight response
    /// becomes stale. Used on reset and teardown.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_issue_wins() {
        let seq = RequestSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        // Completion order does not matter; only issuance order does.
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }

    #[test]
    fn single_issue_stays_current() {
        let seq = RequestSequencer::new();
        let a = seq.issue();
        assert!(seq.is_current(a));
    }

    #[test]
    fn invalidate_stales_everything_in_flight() {
        let seq = RequestSequencer::new();
        let a = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(a));

        // The next issued request is current again.
        let b = seq.issue();
        assert!(seq.is_current(b));
    }
}
