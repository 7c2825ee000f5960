//! Click reaction tracking
//!
//! Counts non-double-clicks inside a rolling decay window and maps the count
//! to escalating, then saturating, reaction tiers. The nonlinearity is
//! intentional: repeated clicking must not loop identical reactions forever.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::timer::OneShot;
use crate::types::{MascotEvent, Mood};

/// Clicks closer together than this are a double-click.
pub const DOUBLE_CLICK_MS: f64 = 300.0;

/// Double-click spin animation length.
pub const SPIN_DURATION_MS: f64 = 450.0;

/// Click-count tier boundaries.
pub const TIER_CONFUSED: u32 = 4;
pub const TIER_STRESSED: u32 = 7;
pub const TIER_ANNOYED: u32 = 10;

/// The counter loses 3 after this long without further clicks.
const DECAY_DELAY_MS: f64 = 10_000.0;
const DECAY_AMOUNT: u32 = 3;

/// How a click was classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickReaction {
    /// Second click within the double-click window: spin, counter untouched.
    DoubleClick,
    /// A mood override is already holding the stage; no reaction.
    Suppressed,
    /// Saturated tier: barely reacts, no new override persisted.
    AnnoyedFlash,
    /// A transient override mood with its duration and the event to report.
    Reaction {
        mood: Mood,
        duration_ms: f64,
        event: MascotEvent,
    },
}

#[derive(Debug, Default)]
pub struct ClickTracker {
    count: u32,
    last_click_ms: Option<f64>,
    decay: OneShot,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Classify one click and update the counter.
    pub fn on_click(
        &mut self,
        now_ms: f64,
        override_active: bool,
        rng: &mut SmallRng,
    ) -> ClickReaction {
        let since_last = self.last_click_ms.map(|last| now_ms - last);
        self.last_click_ms = Some(now_ms);

        if matches!(since_last, Some(gap) if gap < DOUBLE_CLICK_MS) {
            return ClickReaction::DoubleClick;
        }

        if override_active {
            return ClickReaction::Suppressed;
        }

        self.count += 1;
        self.decay.schedule(now_ms, DECAY_DELAY_MS);

        if self.count >= TIER_ANNOYED {
            ClickReaction::AnnoyedFlash
        } else if self.count >= TIER_STRESSED {
            ClickReaction::Reaction {
                mood: Mood::Stressed,
                duration_ms: 1_500.0,
                event: MascotEvent::Annoyed,
            }
        } else if self.count >= TIER_CONFUSED {
            ClickReaction::Reaction {
                mood: Mood::Confused,
                duration_ms: 1_000.0,
                event: MascotEvent::Click,
            }
        } else {
            let mood = if rng.gen_bool(0.5) {
                Mood::Shocked
            } else {
                Mood::Kinetic
            };
            ClickReaction::Reaction {
                mood,
                duration_ms: 1_000.0,
                event: MascotEvent::Click,
            }
        }
    }

    /// Apply the trailing decay once its window elapses.
    pub fn tick(&mut self, now_ms: f64) {
        if self.decay.fire(now_ms) {
            self.count = self.count.saturating_sub(DECAY_AMOUNT);
        }
    }
}
