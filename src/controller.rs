//! Host-side mood controller
//!
//! A small convenience layer for applications that drive the engine's base
//! mood from their own lifecycle (loading, success, errors). Reactions are
//! timed and revert to `Pensive`; sustained states hold until replaced.

use crate::timer::OneShot;
use crate::types::Mood;

const SUCCESS_REACTION_MS: f64 = 3_000.0;
const ERROR_REACTION_MS: f64 = 2_000.0;

/// Timed base-mood driver, fed into [`crate::Mascot::set_mood`].
#[derive(Debug)]
pub struct MoodController {
    mood: Mood,
    revert: OneShot,
}

impl Default for MoodController {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodController {
    pub fn new() -> Self {
        Self {
            mood: Mood::Pensive,
            revert: OneShot::new(),
        }
    }

    /// The base mood the host should currently apply.
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Hold a mood with a timed revert to `Pensive`.
    pub fn trigger_reaction(&mut self, now_ms: f64, mood: Mood, duration_ms: f64) {
        self.mood = mood;
        self.revert.schedule(now_ms, duration_ms);
    }

    /// Hold a mood indefinitely, until the next transition.
    pub fn set_sustained(&mut self, mood: Mood) {
        self.mood = mood;
        self.revert.cancel();
    }

    /// Something succeeded: delighted for a few seconds.
    pub fn on_success(&mut self, now_ms: f64) {
        self.trigger_reaction(now_ms, Mood::Delighted, SUCCESS_REACTION_MS);
    }

    /// Something failed: briefly confused.
    pub fn on_error(&mut self, now_ms: f64) {
        self.trigger_reaction(now_ms, Mood::Confused, ERROR_REACTION_MS);
    }

    /// Long-running work started.
    pub fn on_loading(&mut self) {
        self.set_sustained(Mood::Pondering);
    }

    /// Work finished and the host is at rest.
    pub fn on_complete(&mut self) {
        self.set_sustained(Mood::Zen);
    }

    /// Apply a pending revert. Call on the host's timer cadence.
    pub fn tick(&mut self, now_ms: f64) {
        if self.revert.fire(now_ms) {
            self.mood = Mood::Pensive;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reaction_reverts_to_pensive() {
        let mut controller = MoodController::new();
        controller.on_success(0.0);
        assert_eq!(controller.mood(), Mood::Delighted);

        controller.tick(2_000.0);
        assert_eq!(controller.mood(), Mood::Delighted);

        controller.tick(3_000.0);
        assert_eq!(controller.mood(), Mood::Pensive);
    }

    #[test]
    fn test_sustained_mood_holds() {
        let mut controller = MoodController::new();
        controller.on_error(0.0);
        controller.on_loading();
        assert_eq!(controller.mood(), Mood::Pondering);

        // The error revert was cancelled by the sustained transition.
        controller.tick(60_000.0);
        assert_eq!(controller.mood(), Mood::Pondering);

        controller.on_complete();
        assert_eq!(controller.mood(), Mood::Zen);
    }

    #[test]
    fn test_new_reaction_supersedes_pending_revert() {
        let mut controller = MoodController::new();
        controller.on_error(0.0);
        controller.on_success(1_000.0);

        controller.tick(2_500.0);
        assert_eq!(controller.mood(), Mood::Delighted);
        controller.tick(4_000.0);
        assert_eq!(controller.mood(), Mood::Pensive);
    }
}
