//! In-flight request tracker feeding the overlay frame's busy flag.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyTracker {
    in_flight: u32,
}

impl BusyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.in_flight = self.in_flight.saturating_add(1);
        tracing::debug!(in_flight = self.in_flight, "request started");
    }

    /// Mark one request finished. Unbalanced calls are ignored.
    pub fn end(&mut self) {
        if self.in_flight > 0 {
            self.in_flight -= 1;
            tracing::debug!(in_flight = self.in_flight, "request finished");
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::BusyTracker;

    #[test]
    fn busy_until_every_request_ends() {
        let mut busy = BusyTracker::new();
        busy.begin();
        busy.begin();
        busy.end();
        assert!(busy.is_busy());
        busy.end();
        assert!(!busy.is_busy());
    }

    #[test]
    fn extra_end_does_not_underflow() {
        let mut busy = BusyTracker::new();
        busy.end();
        assert_eq!(busy.in_flight(), 0);
        busy.begin();
        assert_eq!(busy.in_flight(), 1);
    }
}
