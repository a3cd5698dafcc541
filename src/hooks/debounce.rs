//! Debounced value

/// Holds the latest input until no new input arrives for `delay_ms`.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Record a new input at `now_ms`, restarting the quiet period
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Emit the pending value once the quiet period has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now_ms.saturating_sub(*at) >= self.delay_ms => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Pending value, if any
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// Time at which the pending value will settle
    pub fn due_at(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, at)| at.saturating_add(self.delay_ms))
    }

    /// Drop the pending value
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_after_quiet_period() {
        let mut d = Debounce::new(300);
        d.push("a", 0);
        assert_eq!(d.poll(299), None);
        assert_eq!(d.poll(300), Some("a"));
        assert_eq!(d.poll(1000), None);
    }

    #[test]
    fn test_new_input_restarts_timer() {
        let mut d = Debounce::new(100);
        d.push("a", 0);
        d.push("ab", 80);
        assert_eq!(d.poll(150), None);
        assert_eq!(d.due_at(), Some(180));
        assert_eq!(d.poll(180), Some("ab"));
    }

    #[test]
    fn test_cancel() {
        let mut d = Debounce::new(10);
        d.push(1, 0);
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.poll(100), None);
        assert!(d.pending().is_none());
    }

    #[test]
    fn test_clock_going_backwards_does_not_emit() {
        let mut d = Debounce::new(10);
        d.push(1, 50);
        assert_eq!(d.poll(20), None);
    }
}
