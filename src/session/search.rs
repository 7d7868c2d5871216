//! Latest-wins bookkeeping for concurrent searches.
//!
//! Searches run off the render thread and may complete out of order. Each
//! one is issued a [`SearchTicket`]; a result is only accepted if its ticket
//! is still the newest one issued.

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Request-generation counter.
#[derive(Debug, Default)]
pub struct SearchTracker {
    latest: u64,
    pending: bool,
}

impl SearchTracker {
    /// No search issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new search, superseding any earlier one.
    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        self.pending = true;
        SearchTicket(self.latest)
    }

    /// Whether `ticket` belongs to the newest search.
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Record that `ticket` completed. Returns `true` when the result should
    /// be applied, `false` when it is stale and must be discarded.
    pub fn complete(&mut self, ticket: SearchTicket) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale search result #{} (latest #{})",
                ticket.0,
                self.latest
            );
            return false;
        }
        self.pending = false;
        true
    }

    /// Whether the newest search has not completed yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let mut tracker = SearchTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(tracker.is_pending());

        // Second finishes first and is applied.
        assert!(tracker.complete(second));
        assert!(!tracker.is_pending());
        // First arrives late and is dropped.
        assert!(!tracker.complete(first));
    }

    #[test]
    fn stale_completion_keeps_pending() {
        let mut tracker = SearchTracker::new();
        let old = tracker.issue();
        let _new = tracker.issue();
        assert!(!tracker.complete(old));
        assert!(tracker.is_pending());
    }
}
