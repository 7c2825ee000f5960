//! Spring-physics pupil tracking
//!
//! A discrete near-critically-damped spring smooths the gaze target into a
//! pupil offset. Integration is a pure per-frame step so the physics is
//! testable without a real animation clock; the host invokes it once per
//! rendering frame. The integrator holds no mood semantics — it only produces
//! a rendering offset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Maximum pupil travel from eye center, in viewBox units.
pub const TRACK_RADIUS: f32 = 2.0;

/// Vertical clamp applied after the scroll bias is mixed in.
pub const VERTICAL_BOUND: f32 = 2.0;

/// Pointer distance (px) that maps to one unit of pupil travel.
const POINTER_DISTANCE_SCALE: f32 = 20.0;

/// Spring coefficients. Product-tuned; damping < 1 guarantees stability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 0.15,
            damping: 0.75,
        }
    }
}

/// Spring integrator state, owned exclusively by the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
}

impl SpringState {
    /// Advance the spring one frame.
    ///
    /// `velocity += (target - position) * stiffness`, then `velocity *=
    /// damping`, then `position += velocity`. Position trends toward the
    /// target without teleporting; the step size is bounded per frame.
    pub fn step(&self, config: &SpringConfig) -> SpringState {
        let force = (self.target - self.position) * config.stiffness;
        let velocity = (self.velocity + force) * config.damping;
        SpringState {
            position: self.position + velocity,
            velocity,
            target: self.target,
        }
    }
}

/// Map scroll progress (0-1) to a vertical gaze bias in [-1.5, 1.5].
pub fn scroll_bias(scroll_progress: f32) -> f32 {
    (scroll_progress.clamp(0.0, 1.0) - 0.5) * 3.0
}

/// Derive the gaze target from the pointer offset relative to the avatar
/// center, clamped to [`TRACK_RADIUS`], plus the scroll bias, clamped again to
/// [`VERTICAL_BOUND`].
pub fn gaze_target(pointer_offset: Vec2, scroll_bias: f32) -> Vec2 {
    let angle = pointer_offset.y.atan2(pointer_offset.x);
    let distance = (pointer_offset.length() / POINTER_DISTANCE_SCALE).min(TRACK_RADIUS);

    let x = angle.cos() * distance;
    let y = (angle.sin() * distance + scroll_bias).clamp(-VERTICAL_BOUND, VERTICAL_BOUND);
    Vec2::new(x, y)
}
