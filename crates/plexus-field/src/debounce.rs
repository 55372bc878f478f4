//! Trailing-edge debouncing for bursty notifications.

use std::time::{Duration, Instant};

/// Collapses a burst of triggers into one firing after a quiet window.
///
/// Every [`trigger`](Self::trigger) pushes the deadline back; the
/// debouncer fires once the deadline passes without another trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record a notification at `now`, restarting the quiet window.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when the quiet window has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.trigger(start);
        assert!(!debouncer.fire(start + Duration::from_millis(199)));
        assert!(debouncer.fire(start + Duration::from_millis(200)));
        assert!(!debouncer.fire(start + Duration::from_millis(500)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_trigger_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(150));
        assert!(!debouncer.fire(start + Duration::from_millis(250)));
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(350))
        );
        assert!(debouncer.fire(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.trigger(start);
        debouncer.cancel();
        assert!(!debouncer.fire(start + Duration::from_secs(1)));
    }
}
