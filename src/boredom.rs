//! Boredom escalation tracking
//!
//! An activity clock is reset by any user input and compared against ordered
//! idle thresholds on a fixed 1-second poll cadence. The ladder only moves
//! forward while idle, at most one step per poll, and snaps back to `Awake`
//! on activity. Advancing into `Yawning` arms a short transitional timer that
//! closes the yawn into sleep ahead of the next poll.

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::timer::OneShot;
use crate::types::{BoredomLevel, MascotEvent};

/// Idle time before the mascot starts yawning.
pub const YAWNING_AFTER_MS: f64 = 9_000.0;
/// Idle time before the mascot falls asleep.
pub const SLEEPING_AFTER_MS: f64 = 12_000.0;
/// Idle time before snoring starts.
pub const SNORING_AFTER_MS: f64 = 30_000.0;
/// Idle time before the dream bubble appears.
pub const DREAMING_AFTER_MS: f64 = 60_000.0;

/// Escalation poll cadence.
const POLL_INTERVAL_MS: f64 = 1_000.0;

/// A yawn naturally closes into sleep after this long, regardless of the poll.
const YAWN_TO_SLEEP_MS: f64 = 1_200.0;

/// Thought-bubble icons cycled while dreaming. Weird and surreal on purpose.
const DREAM_ICONS: &[&str] = &[
    "🦑", "🧀", "👁️", "🌀", "🦷", "🫠", "🔮", "🪼", "🧲", "🦔", "🫧", "🍄", "🐙", "🦴", "🧿",
    "🪞", "🛰️", "🧬", "🕳️", "🗝️", "🧪", "🪐", "🦠", "🪁", "🧭", "🧵", "🦇", "🦉", "🦚", "🪆",
    "🧠", "🧟", "🧜", "🧙", "🗿", "🧩", "🧨", "🧮", "🫖", "🫐", "🪸", "🪲", "🪴", "🦥", "🦭",
    "🦩", "🐌", "🦋", "🐢", "🕸️", "🧊", "🧋", "🧸", "🪕", "🎲", "🛸", "📐", "📈", "➗", "🏴‍☠️",
];

/// Idle timer / state ladder for boredom escalation.
#[derive(Debug)]
pub struct BoredomTracker {
    level: BoredomLevel,
    last_activity_ms: f64,
    last_poll_ms: f64,
    yawn_timer: OneShot,
    dream_icon: &'static str,
}

impl BoredomTracker {
    pub fn new(now_ms: f64) -> Self {
        Self {
            level: BoredomLevel::Awake,
            last_activity_ms: now_ms,
            last_poll_ms: now_ms,
            yawn_timer: OneShot::new(),
            dream_icon: DREAM_ICONS[0],
        }
    }

    pub fn level(&self) -> BoredomLevel {
        self.level
    }

    /// Whether the sleep-derived mood applies (any level past awake).
    pub fn is_asleep(&self) -> bool {
        self.level != BoredomLevel::Awake
    }

    pub fn is_yawning(&self) -> bool {
        self.level == BoredomLevel::Yawning
    }

    pub fn dream_icon(&self) -> &'static str {
        self.dream_icon
    }

    /// Reset the activity clock. Forces the level back to `Awake` and emits a
    /// `wake` event if the ladder had advanced.
    pub fn register_activity(&mut self, now_ms: f64) -> Option<MascotEvent> {
        self.last_activity_ms = now_ms;

        if self.level != BoredomLevel::Awake {
            debug!(level = self.level.as_str(), "mascot woke up");
            self.level = BoredomLevel::Awake;
            self.yawn_timer.cancel();
            Some(MascotEvent::Wake)
        } else {
            None
        }
    }

    /// Run due escalation polls and the yawn-to-sleep timer.
    ///
    /// Catches up on missed poll slots if the host ticks coarsely, evaluating
    /// each slot at its scheduled time so a level still advances at most one
    /// step per slot.
    pub fn tick(&mut self, now_ms: f64, rng: &mut SmallRng) -> Vec<MascotEvent> {
        let mut events = Vec::new();

        if self.yawn_timer.fire(now_ms) && self.level == BoredomLevel::Yawning {
            self.level = BoredomLevel::Sleeping;
            debug!("yawn closed into sleep");
            events.push(MascotEvent::Idle);
        }

        while now_ms - self.last_poll_ms >= POLL_INTERVAL_MS {
            self.last_poll_ms += POLL_INTERVAL_MS;
            let poll_at = self.last_poll_ms;
            if let Some(event) = self.poll(poll_at, rng) {
                events.push(event);
            }

            // The yawn timer may come due between poll slots.
            if self.yawn_timer.fire(poll_at) && self.level == BoredomLevel::Yawning {
                self.level = BoredomLevel::Sleeping;
                events.push(MascotEvent::Idle);
            }
        }

        events
    }

    /// One escalation check: advance at most one step, forward only.
    fn poll(&mut self, poll_at_ms: f64, rng: &mut SmallRng) -> Option<MascotEvent> {
        let idle_ms = poll_at_ms - self.last_activity_ms;

        let next = match self.level {
            BoredomLevel::Awake if idle_ms > YAWNING_AFTER_MS => BoredomLevel::Yawning,
            BoredomLevel::Yawning if idle_ms > SLEEPING_AFTER_MS => BoredomLevel::Sleeping,
            BoredomLevel::Sleeping if idle_ms > SNORING_AFTER_MS => BoredomLevel::Snoring,
            BoredomLevel::Snoring if idle_ms > DREAMING_AFTER_MS => BoredomLevel::Dreaming,
            _ => return None,
        };

        debug!(prev = self.level.as_str(), next = next.as_str(), "boredom escalated");
        self.level = next;

        match next {
            BoredomLevel::Yawning => {
                self.yawn_timer.schedule(poll_at_ms, YAWN_TO_SLEEP_MS);
                Some(MascotEvent::Boredom {
                    level: BoredomLevel::Yawning,
                })
            }
            BoredomLevel::Sleeping => {
                self.yawn_timer.cancel();
                Some(MascotEvent::Idle)
            }
            BoredomLevel::Snoring => Some(MascotEvent::Boredom {
                level: BoredomLevel::Snoring,
            }),
            BoredomLevel::Dreaming => {
                self.dream_icon = DREAM_ICONS[rng.gen_range(0..DREAM_ICONS.len())];
                Some(MascotEvent::Boredom {
                    level: BoredomLevel::Dreaming,
                })
            }
            BoredomLevel::Awake => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    /// Drive ticks every 250ms up to `until_ms`, collecting events.
    fn run_until(
        tracker: &mut BoredomTracker,
        from_ms: f64,
        until_ms: f64,
        rng: &mut SmallRng,
    ) -> Vec<MascotEvent> {
        let mut events = Vec::new();
        let mut t = from_ms;
        while t <= until_ms {
            events.extend(tracker.tick(t, rng));
            t += 250.0;
        }
        events
    }

    #[test]
    fn test_level_non_decreasing_while_idle() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();
        let mut prev = tracker.level();

        let mut t = 0.0;
        while t < 90_000.0 {
            tracker.tick(t, &mut rng);
            assert!(tracker.level() >= prev);
            prev = tracker.level();
            t += 500.0;
        }
        assert_eq!(tracker.level(), BoredomLevel::Dreaming);
    }

    #[test]
    fn test_escalation_events_fire_once_each() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();
        let events = run_until(&mut tracker, 0.0, 90_000.0, &mut rng);

        let yawns = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    MascotEvent::Boredom {
                        level: BoredomLevel::Yawning
                    }
                )
            })
            .count();
        let idles = events
            .iter()
            .filter(|e| matches!(e, MascotEvent::Idle))
            .count();
        let snores = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    MascotEvent::Boredom {
                        level: BoredomLevel::Snoring
                    }
                )
            })
            .count();
        let dreams = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    MascotEvent::Boredom {
                        level: BoredomLevel::Dreaming
                    }
                )
            })
            .count();

        assert_eq!(yawns, 1);
        assert_eq!(idles, 1);
        assert_eq!(snores, 1);
        assert_eq!(dreams, 1);
    }

    #[test]
    fn test_yawn_timer_closes_into_sleep_before_poll_threshold() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();

        // First poll past 9s idle starts the yawn.
        run_until(&mut tracker, 0.0, 10_000.0, &mut rng);
        assert_eq!(tracker.level(), BoredomLevel::Yawning);

        // 1.2s later the yawn closes, well before the 12s threshold.
        let events = run_until(&mut tracker, 10_250.0, 11_250.0, &mut rng);
        assert_eq!(tracker.level(), BoredomLevel::Sleeping);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, MascotEvent::Idle))
                .count(),
            1
        );
    }

    #[test]
    fn test_activity_resets_to_awake_and_wakes() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();
        run_until(&mut tracker, 0.0, 15_000.0, &mut rng);
        assert_eq!(tracker.level(), BoredomLevel::Sleeping);

        let wake = tracker.register_activity(15_100.0);
        assert_eq!(wake, Some(MascotEvent::Wake));
        assert_eq!(tracker.level(), BoredomLevel::Awake);

        // No stale yawn timer fires afterwards.
        let events = run_until(&mut tracker, 15_250.0, 17_000.0, &mut rng);
        assert!(events.is_empty());
    }

    #[test]
    fn test_activity_while_awake_emits_nothing() {
        let mut tracker = BoredomTracker::new(0.0);
        assert_eq!(tracker.register_activity(100.0), None);
    }

    #[test]
    fn test_holds_at_dreaming() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();
        run_until(&mut tracker, 0.0, 90_000.0, &mut rng);
        assert_eq!(tracker.level(), BoredomLevel::Dreaming);

        let events = run_until(&mut tracker, 90_250.0, 200_000.0, &mut rng);
        assert!(events.is_empty());
        assert_eq!(tracker.level(), BoredomLevel::Dreaming);
    }

    #[test]
    fn test_coarse_ticks_catch_up() {
        let mut tracker = BoredomTracker::new(0.0);
        let mut rng = rng();

        // A single late tick runs all missed poll slots in order.
        let events = tracker.tick(35_000.0, &mut rng);
        assert_eq!(tracker.level(), BoredomLevel::Snoring);
        assert!(events.len() >= 3);
    }
}
