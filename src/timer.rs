//! One-shot deadline primitive
//!
//! Every transient effect in the engine (mood-override expiry, dizzy recovery,
//! click decay, shy/curiosity timers, blink scheduling) is a `OneShot` owned
//! by the detector that scheduled it. Deadlines are polled against injected
//! monotonic time, so cancellation is a field write and teardown is `Drop` —
//! no callback can outlive its owner.

/// A cancellable one-shot deadline in engine milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShot {
    deadline_ms: Option<f64>,
}

impl OneShot {
    pub fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Schedule (or reschedule) the deadline at `now + delay`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms);
    }

    /// Cancel a pending deadline. No-op if none is pending.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Poll the deadline. Returns `true` exactly once, on the first poll at or
    /// after the scheduled time, and clears the deadline.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
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
    fn test_fires_once() {
        let mut t = OneShot::new();
        t.schedule(0.0, 100.0);

        assert!(!t.fire(50.0));
        assert!(t.fire(100.0));
        assert!(!t.fire(150.0));
        assert!(!t.is_pending());
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut t = OneShot::new();
        t.schedule(0.0, 100.0);
        t.cancel();
        assert!(!t.fire(200.0));
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut t = OneShot::new();
        t.schedule(0.0, 100.0);
        t.schedule(0.0, 500.0);

        assert!(!t.fire(200.0));
        assert!(t.fire(500.0));
    }

    #[test]
    fn test_unscheduled_never_fires() {
        let mut t = OneShot::new();
        assert!(!t.fire(1_000_000.0));
    }
}
