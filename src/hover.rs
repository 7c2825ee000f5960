//! Hover intent tracking
//!
//! While the pointer hovers the avatar, continuous distance sampling drives a
//! bounded lean toward the cursor, a squint at close range, a curiosity head
//! tilt after sustained hover, and a shy look-away after a sustained close
//! stare. Leaving hover resets everything instantly — hover loss is an
//! unambiguous signal, so there is no decay.

use glam::Vec2;
use tracing::debug;

use crate::timer::OneShot;

/// Pointer px of horizontal offset per degree of lean.
const LEAN_DIVISOR: f32 = 15.0;
/// Lean is bounded to ±8 degrees.
const LEAN_MAX_DEG: f32 = 8.0;
/// Pointer closer than this (px) makes the mascot squint.
const SQUINT_DISTANCE_PX: f32 = 60.0;
/// Curious head tilt, opposite the lean direction.
const TILT_DEG: f32 = 12.0;
/// Continuous hover before the curiosity tilt engages.
const TILT_DELAY_MS: f64 = 2_000.0;
/// Sustained close stare before the mascot gets shy.
const SHY_DELAY_MS: f64 = 4_000.0;
/// Shyness clears on its own after this long.
const SHY_CLEAR_MS: f64 = 2_000.0;

/// Bashful down-and-away gaze while shy.
const SHY_GAZE: Vec2 = Vec2::new(-1.5, 1.5);

#[derive(Debug, Default)]
pub struct HoverTracker {
    hovering: bool,
    lean_angle: f32,
    head_tilt: f32,
    squinting: bool,
    shy: bool,
    tilt_timer: OneShot,
    shy_timer: OneShot,
    shy_clear: OneShot,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn lean_angle(&self) -> f32 {
        self.lean_angle
    }

    pub fn head_tilt(&self) -> f32 {
        self.head_tilt
    }

    pub fn is_squinting(&self) -> bool {
        self.squinting
    }

    pub fn is_shy(&self) -> bool {
        self.shy
    }

    /// Gaze target forced while shy.
    pub fn gaze_override(&self) -> Option<Vec2> {
        self.shy.then_some(SHY_GAZE)
    }

    pub fn enter(&mut self, now_ms: f64) {
        if self.hovering {
            return;
        }
        self.hovering = true;
        self.tilt_timer.schedule(now_ms, TILT_DELAY_MS);
    }

    /// Instant full reset: lean, tilt, squint, and shyness all drop with the
    /// hover, and every pending timer is cancelled.
    pub fn leave(&mut self) {
        self.hovering = false;
        self.lean_angle = 0.0;
        self.head_tilt = 0.0;
        self.squinting = false;
        self.shy = false;
        self.tilt_timer.cancel();
        self.shy_timer.cancel();
        self.shy_clear.cancel();
    }

    /// Feed one pointer sample while hovering: offset from the avatar center.
    pub fn sample(&mut self, now_ms: f64, offset: Vec2) {
        if !self.hovering {
            return;
        }

        self.lean_angle = (offset.x / LEAN_DIVISOR).clamp(-LEAN_MAX_DEG, LEAN_MAX_DEG);
        self.squinting = offset.length() < SQUINT_DISTANCE_PX;

        if self.squinting {
            if !self.shy && !self.shy_timer.is_pending() {
                self.shy_timer.schedule(now_ms, SHY_DELAY_MS);
            }
        } else {
            // Backing off cancels the stare.
            self.shy_timer.cancel();
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        if self.tilt_timer.fire(now_ms) && self.hovering && !self.shy {
            self.head_tilt = if self.lean_angle > 0.0 {
                -TILT_DEG
            } else {
                TILT_DEG
            };
        }

        if self.shy_timer.fire(now_ms) && self.hovering && self.squinting {
            debug!("sustained stare, mascot looks away");
            self.shy = true;
            self.head_tilt = 0.0;
            self.tilt_timer.cancel();
            self.shy_clear.schedule(now_ms, SHY_CLEAR_MS);
        }

        if self.shy_clear.fire(now_ms) {
            self.shy = false;
            if self.hovering {
                self.tilt_timer.schedule(now_ms, TILT_DELAY_MS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lean_is_bounded() {
        let mut hover = HoverTracker::new();
        hover.enter(0.0);

        hover.sample(10.0, Vec2::new(500.0, 0.0));
        assert_eq!(hover.lean_angle(), LEAN_MAX_DEG);

        hover.sample(20.0, Vec2::new(-45.0, 0.0));
        assert_eq!(hover.lean_angle(), -3.0);
    }

    #[test]
    fn test_curiosity_tilt_after_two_seconds() {
        let mut hover = HoverTracker::new();
        hover.enter(0.0);
        hover.sample(10.0, Vec2::new(75.0, 0.0));

        hover.tick(1_000.0);
        assert_eq!(hover.head_tilt(), 0.0);

        hover.tick(2_000.0);
        // Tilts opposite the lean.
        assert_eq!(hover.head_tilt(), -TILT_DEG);
    }

    #[test]
    fn test_shy_after_sustained_close_stare() {
        let mut hover = HoverTracker::new();
        hover.enter(0.0);
        hover.sample(10.0, Vec2::new(30.0, 10.0));
        assert!(hover.is_squinting());

        hover.tick(3_000.0);
        assert!(!hover.is_shy());

        hover.tick(4_100.0);
        assert!(hover.is_shy());
        assert_eq!(hover.gaze_override(), Some(SHY_GAZE));

        // Clears on its own after 2s.
        hover.tick(6_200.0);
        assert!(!hover.is_shy());
        assert_eq!(hover.gaze_override(), None);
    }

    #[test]
    fn test_backing_off_cancels_shy_timer() {
        let mut hover = HoverTracker::new();
        hover.enter(0.0);
        hover.sample(10.0, Vec2::new(30.0, 0.0));

        // Pointer retreats beyond the squint radius before the stare lands.
        hover.sample(2_000.0, Vec2::new(120.0, 0.0));
        assert!(!hover.is_squinting());

        hover.tick(10_000.0);
        assert!(!hover.is_shy());
    }

    #[test]
    fn test_leave_resets_instantly() {
        let mut hover = HoverTracker::new();
        hover.enter(0.0);
        hover.sample(10.0, Vec2::new(30.0, 0.0));
        hover.tick(2_500.0);
        hover.tick(4_500.0);
        assert!(hover.is_shy());

        hover.leave();
        assert!(!hover.is_hovering());
        assert_eq!(hover.lean_angle(), 0.0);
        assert_eq!(hover.head_tilt(), 0.0);
        assert!(!hover.is_squinting());
        assert!(!hover.is_shy());

        // No stale timer acts after the reset.
        hover.tick(20_000.0);
        assert!(!hover.is_shy());
        assert_eq!(hover.head_tilt(), 0.0);
    }
}
