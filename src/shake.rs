//! Pointer-shake detection
//!
//! Accumulates a shake score from direction reversals of the pointer
//! displacement vector. Sustained oscillation always eventually crosses the
//! threshold; smooth monotonic motion never does, because monotonic samples
//! decay the score.

use glam::Vec2;
use tracing::debug;

use crate::timer::OneShot;
use crate::types::MascotEvent;

/// Accumulated reversals needed to trigger dizziness.
pub const SHAKE_THRESHOLD: f32 = 15.0;

/// Displacements shorter than this (px) are treated as noise.
const NOISE_FLOOR_PX: f32 = 5.0;

/// Score decay per sample while moving in a consistent direction.
const MONOTONIC_DECAY: f32 = 0.05;

/// Score decay per sample while effectively still.
const STILLNESS_DECAY: f32 = 0.2;

/// Dizziness clears on its own after this long.
const DIZZY_RECOVERY_MS: f64 = 3_000.0;

/// Shake-to-dizzy gesture detector.
#[derive(Debug)]
pub struct ShakeDetector {
    last_pos: Option<Vec2>,
    last_delta: Vec2,
    score: f32,
    dizzy: bool,
    recovery: OneShot,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self {
            last_pos: None,
            last_delta: Vec2::ZERO,
            score: 0.0,
            dizzy: false,
            recovery: OneShot::new(),
        }
    }

    pub fn is_dizzy(&self) -> bool {
        self.dizzy
    }

    #[cfg(test)]
    pub(crate) fn score(&self) -> f32 {
        self.score
    }

    /// Feed one pointer-move sample.
    ///
    /// `override_active` suppresses triggering while a mood override holds the
    /// stage. Returns the `dizzy` event exactly once per crossing.
    pub fn sample(
        &mut self,
        now_ms: f64,
        pos: Vec2,
        override_active: bool,
    ) -> Option<MascotEvent> {
        let prev = match self.last_pos.replace(pos) {
            Some(prev) => prev,
            None => return None,
        };

        let delta = pos - prev;

        if delta.length() > NOISE_FLOOR_PX {
            // Negative dot product means the pointer reversed direction.
            if delta.dot(self.last_delta) < 0.0 {
                self.score += 1.0;
            } else {
                self.score = (self.score - MONOTONIC_DECAY).max(0.0);
            }
            self.last_delta = delta;
        } else {
            self.score = (self.score - STILLNESS_DECAY).max(0.0);
        }

        if self.score > SHAKE_THRESHOLD && !self.dizzy && !override_active {
            debug!("shake threshold crossed, mascot is dizzy");
            self.dizzy = true;
            self.score = 0.0;
            self.recovery.schedule(now_ms, DIZZY_RECOVERY_MS);
            return Some(MascotEvent::Dizzy);
        }

        None
    }

    /// Clear dizziness once the recovery deadline passes.
    pub fn tick(&mut self, now_ms: f64) {
        if self.recovery.fire(now_ms) {
            self.dizzy = false;
        }
    }
}
