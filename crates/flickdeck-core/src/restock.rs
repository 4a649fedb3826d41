//! Deferred restock of an emptied deck.

use std::time::Duration;

/// A single cancellable deadline, advanced by frame time rather than a wall
/// clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestockTimer {
    remaining: Option<Duration>,
}

impl RestockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. Returns `false` and leaves the existing deadline alone
    /// if one is already pending.
    pub fn schedule(&mut self, delay: Duration) -> bool {
        if self.remaining.is_some() {
            return false;
        }
        self.remaining = Some(delay);
        true
    }

    /// Returns `true` if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Count down; returns `true` exactly once, on the call that reaches the
    /// deadline.
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) if remaining <= dt => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_the_deadline() {
        let mut timer = RestockTimer::new();
        assert!(timer.schedule(Duration::from_millis(600)));
        assert!(!timer.advance(Duration::from_millis(599)));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(1)));
        assert!(timer.advance(Duration::from_millis(1)));
        assert!(!timer.advance(Duration::from_millis(1000)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn second_schedule_keeps_first_deadline() {
        let mut timer = RestockTimer::new();
        timer.schedule(Duration::from_millis(600));
        timer.advance(Duration::from_millis(500));
        assert!(!timer.schedule(Duration::from_millis(600)));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = RestockTimer::new();
        timer.schedule(Duration::from_millis(10));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.advance(Duration::from_secs(1)));
    }
}
