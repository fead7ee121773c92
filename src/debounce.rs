use std::time::Duration;

/// Trailing-edge debounce as an explicit timer-reset state machine.
///
/// Time is a monotonic offset supplied by the caller (a page's
/// `performance.now()` or a test clock), which keeps the type free of any
/// timer API. Every `schedule` replaces the pending deadline; `fire`
/// reports the deadline exactly once after it has passed.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel whatever is pending and arm a fresh deadline `now + delay`.
    pub fn schedule(&mut self, now: Duration) -> Duration {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// `true` once the quiet period has elapsed; the debouncer is then idle.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
