//! Engine orchestration
//!
//! `Mascot` owns every detector and fuses their signal state into one
//! resolved mood per tick. It runs on injected monotonic time with two entry
//! points on the host's scheduler: `tick` (timers, polls, mood resolution)
//! and `frame` (spring integration, once per animation frame). Event handlers
//! are synchronous and complete before the next tick observes their effects,
//! matching a single-threaded event-loop host. Dropping the engine drops
//! every pending deadline with it.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::boredom::BoredomTracker;
use crate::click::{ClickReaction, ClickTracker, SPIN_DURATION_MS};
use crate::hover::HoverTracker;
use crate::konami::{KonamiDetector, KONAMI_DURATION_MS};
use crate::resolver::{resolve_mood, DisplayFlags};
use crate::shake::ShakeDetector;
use crate::spring::{gaze_target, scroll_bias, SpringConfig, SpringState};
use crate::timer::OneShot;
use crate::types::{MascotEvent, MascotSnapshot, Mood, Wink};

/// Entrance animation window after construction.
const ENTRANCE_MS: f64 = 600.0;

/// Blink scheduling: next blink lands 3-8 seconds out.
const BLINK_MIN_MS: f64 = 3_000.0;
const BLINK_JITTER_MS: f64 = 5_000.0;
/// How long the lids stay closed.
const BLINK_CLOSED_MS: f64 = 150.0;
/// Gap between the two blinks of a double blink.
const BLINK_GAP_MS: f64 = 100.0;
const WINK_MS: f64 = 200.0;

/// Forward-glance (distraction saccade) scheduling.
const GLANCE_MIN_MS: f64 = 1_400.0;
const GLANCE_JITTER_MS: f64 = 2_200.0;
const GLANCE_HOLD_MIN_MS: f64 = 220.0;
const GLANCE_HOLD_JITTER_MS: f64 = 720.0;

const SPARKLE_MS: f64 = 1_000.0;

/// Success reaction: override length and jump animation length.
const SUCCESS_OVERRIDE_MS: f64 = 2_200.0;
const JUMP_MS: f64 = 650.0;

/// Interactive mascot behavior engine.
///
/// Constructed when the mascot mounts and dropped on unmount; no state
/// survives teardown.
#[derive(Debug)]
pub struct Mascot {
    base_mood: Mood,
    center: Option<Vec2>,
    pointer: Option<Vec2>,
    scroll_progress: f32,

    spring: SpringState,
    spring_config: SpringConfig,

    boredom: BoredomTracker,
    shake: ShakeDetector,
    konami: KonamiDetector,
    clicks: ClickTracker,
    hover: HoverTracker,

    override_mood: Option<Mood>,
    override_timer: OneShot,
    konami_active: bool,
    konami_timer: OneShot,

    blink: bool,
    wink: Wink,
    next_blink: OneShot,
    blink_end: OneShot,
    second_blink: OneShot,
    wink_end: OneShot,

    distraction: Option<Vec2>,
    glance_timer: OneShot,
    glance_end: OneShot,

    spinning: bool,
    spin_end: OneShot,
    jumping: bool,
    jump_end: OneShot,
    sparkles: bool,
    sparkle_end: OneShot,
    entering: bool,
    entrance_end: OneShot,

    events: Vec<MascotEvent>,
    rng: SmallRng,
}

impl Mascot {
    /// Create an engine with an entropy-seeded RNG.
    pub fn new(now_ms: f64, base_mood: Mood) -> Self {
        Self::with_seed(now_ms, base_mood, rand::random())
    }

    /// Create an engine with a fixed RNG seed, for deterministic replay and
    /// tests.
    pub fn with_seed(now_ms: f64, base_mood: Mood, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut next_blink = OneShot::new();
        next_blink.schedule(now_ms, BLINK_MIN_MS + rng.gen::<f64>() * BLINK_JITTER_MS);

        let mut glance_timer = OneShot::new();
        glance_timer.schedule(now_ms, GLANCE_MIN_MS + rng.gen::<f64>() * GLANCE_JITTER_MS);

        let mut entrance_end = OneShot::new();
        entrance_end.schedule(now_ms, ENTRANCE_MS);

        Self {
            base_mood,
            center: None,
            pointer: None,
            scroll_progress: 0.0,
            spring: SpringState::default(),
            spring_config: SpringConfig::default(),
            boredom: BoredomTracker::new(now_ms),
            shake: ShakeDetector::new(),
            konami: KonamiDetector::new(),
            clicks: ClickTracker::new(),
            hover: HoverTracker::new(),
            override_mood: None,
            override_timer: OneShot::new(),
            konami_active: false,
            konami_timer: OneShot::new(),
            blink: false,
            wink: Wink::None,
            next_blink,
            blink_end: OneShot::new(),
            second_blink: OneShot::new(),
            wink_end: OneShot::new(),
            distraction: None,
            glance_timer,
            glance_end: OneShot::new(),
            spinning: false,
            spin_end: OneShot::new(),
            jumping: false,
            jump_end: OneShot::new(),
            sparkles: false,
            sparkle_end: OneShot::new(),
            entering: true,
            entrance_end,
            events: Vec::new(),
            rng,
        }
    }

    /// The single authoritative mood at this instant.
    pub fn active_mood(&self) -> Mood {
        resolve_mood(
            self.override_mood,
            self.shake.is_dizzy(),
            self.boredom.is_asleep(),
            self.base_mood,
        )
    }

    /// Report the avatar center in page coordinates, once layout is known.
    /// Pointer-derived gaze and hover geometry no-op until this is set.
    pub fn set_center(&mut self, center: Vec2) {
        self.center = Some(center);
    }

    /// Update the externally-driven base mood.
    pub fn set_mood(&mut self, now_ms: f64, mood: Mood) {
        self.base_mood = mood;

        if mood != Mood::Pondering {
            self.distraction = None;
            self.glance_end.cancel();
        }
        if mood == Mood::Delighted && !self.sparkles {
            self.trigger_sparkles(now_ms);
        }
        self.update_gaze_target();
    }

    // --- Input handlers -------------------------------------------------

    /// Pointer moved anywhere on the page.
    pub fn pointer_moved(&mut self, now_ms: f64, pos: Vec2) {
        if let Some(event) = self.boredom.register_activity(now_ms) {
            self.events.push(event);
        }

        let override_active = self.override_mood.is_some();
        if let Some(event) = self.shake.sample(now_ms, pos, override_active) {
            self.events.push(event);
        }

        self.pointer = Some(pos);
        if let Some(center) = self.center {
            self.hover.sample(now_ms, pos - center);
        }
        self.update_gaze_target();
    }

    /// Pointer entered the avatar.
    pub fn pointer_entered(&mut self, now_ms: f64) {
        self.hover.enter(now_ms);
    }

    /// Pointer left the avatar. Hover-derived state resets instantly.
    pub fn pointer_left(&mut self) {
        self.hover.leave();
        self.update_gaze_target();
    }

    /// Click on the avatar.
    pub fn clicked(&mut self, now_ms: f64) {
        if let Some(event) = self.boredom.register_activity(now_ms) {
            self.events.push(event);
        }

        let override_active = self.override_mood.is_some();
        match self.clicks.on_click(now_ms, override_active, &mut self.rng) {
            ClickReaction::DoubleClick => {
                self.spinning = true;
                self.spin_end.schedule(now_ms, SPIN_DURATION_MS);
                self.events.push(MascotEvent::DoubleClick);
            }
            ClickReaction::Suppressed => {}
            ClickReaction::AnnoyedFlash => {
                self.events.push(MascotEvent::Annoyed);
            }
            ClickReaction::Reaction {
                mood,
                duration_ms,
                event,
            } => {
                self.set_override(now_ms, mood, duration_ms);
                self.events.push(event);
            }
        }
        self.update_gaze_target();
    }

    /// Key pressed anywhere on the page.
    pub fn key_down(&mut self, now_ms: f64, key: &str) {
        if let Some(event) = self.boredom.register_activity(now_ms) {
            self.events.push(event);
        }

        if self.konami.key_down(key) {
            self.set_override(now_ms, Mood::Confident, KONAMI_DURATION_MS);
            self.konami_active = true;
            self.konami_timer.schedule(now_ms, KONAMI_DURATION_MS);
            self.events.push(MascotEvent::Konami);
        }
    }

    /// Page scrolled; `progress` is reading position in [0, 1].
    pub fn scrolled(&mut self, progress: f32) {
        self.scroll_progress = progress.clamp(0.0, 1.0);
        self.update_gaze_target();
    }

    /// External success hook (e.g. an exercise was solved): delighted jump,
    /// unless an override already holds the stage.
    pub fn trigger_success(&mut self, now_ms: f64) {
        if self.override_mood.is_some() {
            return;
        }
        self.set_override(now_ms, Mood::Delighted, SUCCESS_OVERRIDE_MS);
        self.jumping = true;
        self.jump_end.schedule(now_ms, JUMP_MS);
    }

    /// External reset hook: clears the success reaction immediately.
    pub fn reset_success(&mut self) {
        self.jumping = false;
        self.jump_end.cancel();
        self.clear_override();
    }

    /// Fire the sparkle particle burst.
    pub fn trigger_sparkles(&mut self, now_ms: f64) {
        self.sparkles = true;
        self.sparkle_end.schedule(now_ms, SPARKLE_MS);
    }

    // --- Scheduler entry points -----------------------------------------

    /// Advance all timers and polls to `now_ms`. Call at the host's timer
    /// cadence (anything at or under the 1-second boredom poll works; missed
    /// slots are caught up).
    pub fn tick(&mut self, now_ms: f64) {
        if self.entrance_end.fire(now_ms) {
            self.entering = false;
        }

        if self.override_timer.fire(now_ms) {
            debug!(mood = ?self.override_mood, "mood override expired");
            self.override_mood = None;
        }
        if self.konami_timer.fire(now_ms) {
            self.konami_active = false;
        }

        self.shake.tick(now_ms);
        self.clicks.tick(now_ms);
        self.hover.tick(now_ms);

        let boredom_events = self.boredom.tick(now_ms, &mut self.rng);
        self.events.extend(boredom_events);

        self.tick_blink(now_ms);
        self.tick_glance(now_ms);

        if self.spin_end.fire(now_ms) {
            self.spinning = false;
        }
        if self.jump_end.fire(now_ms) {
            self.jumping = false;
        }
        if self.sparkle_end.fire(now_ms) {
            self.sparkles = false;
        }

        self.update_gaze_target();
    }

    /// Advance the spring integrator one animation frame.
    pub fn frame(&mut self) {
        self.spring = self.spring.step(&self.spring_config);
    }

    /// Take all semantic events emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<MascotEvent> {
        std::mem::take(&mut self.events)
    }

    /// Produce the render-boundary snapshot.
    pub fn snapshot(&self) -> MascotSnapshot {
        let active_mood = self.active_mood();
        MascotSnapshot {
            active_mood,
            display: DisplayFlags::for_mood(active_mood, self.boredom.is_yawning()),
            eye_offset: self.spring.position.to_array(),
            lean_angle: self.hover.lean_angle(),
            head_tilt: self.hover.head_tilt(),
            is_hovering: self.hover.is_hovering(),
            is_squinting: self.hover.is_squinting(),
            is_shy: self.hover.is_shy(),
            is_spinning: self.spinning,
            is_jumping: self.jumping,
            is_entering: self.entering,
            is_yawning: self.boredom.is_yawning(),
            konami_active: self.konami_active,
            show_sparkles: self.sparkles,
            blink: self.blink,
            wink: self.wink,
            boredom_level: self.boredom.level(),
            dream_icon: self.boredom.dream_icon(),
            scroll_progress: self.scroll_progress,
            reading_mouth_curve: -1.0 + self.scroll_progress * 2.5,
        }
    }

    // --- Internals ------------------------------------------------------

    fn set_override(&mut self, now_ms: f64, mood: Mood, duration_ms: f64) {
        // Rescheduling supersedes any in-flight expiry.
        self.override_mood = Some(mood);
        self.override_timer.schedule(now_ms, duration_ms);
    }

    fn clear_override(&mut self) {
        self.override_mood = None;
        self.override_timer.cancel();
    }

    /// Recompute the spring target from the current signal state.
    ///
    /// Priority: non-trackable mood forces origin; shy gaze wins over a
    /// distraction glance; otherwise the pointer drives the target. Without a
    /// measured avatar center the pointer-derived update no-ops.
    fn update_gaze_target(&mut self) {
        let active = self.active_mood();

        self.spring.target = if !active.is_trackable() {
            Vec2::ZERO
        } else if let Some(gaze) = self.hover.gaze_override() {
            gaze
        } else if let Some(distraction) = self.distraction {
            distraction
        } else if let (Some(center), Some(pointer)) = (self.center, self.pointer) {
            gaze_target(pointer - center, scroll_bias(self.scroll_progress))
        } else {
            self.spring.target
        };
    }

    fn tick_blink(&mut self, now_ms: f64) {
        if self.next_blink.fire(now_ms) {
            let roll: f64 = self.rng.gen();
            if roll > 0.9 {
                // Wink (10%)
                self.wink = if self.rng.gen_bool(0.5) {
                    Wink::Left
                } else {
                    Wink::Right
                };
                self.wink_end.schedule(now_ms, WINK_MS);
            } else if roll > 0.7 {
                // Double blink (20%)
                self.blink = true;
                self.blink_end.schedule(now_ms, BLINK_CLOSED_MS);
                self.second_blink
                    .schedule(now_ms, BLINK_CLOSED_MS + BLINK_GAP_MS);
            } else {
                self.blink = true;
                self.blink_end.schedule(now_ms, BLINK_CLOSED_MS);
            }
            self.next_blink
                .schedule(now_ms, BLINK_MIN_MS + self.rng.gen::<f64>() * BLINK_JITTER_MS);
        }

        if self.second_blink.fire(now_ms) {
            self.blink = true;
            self.blink_end.schedule(now_ms, BLINK_CLOSED_MS);
        }
        if self.blink_end.fire(now_ms) {
            self.blink = false;
        }
        if self.wink_end.fire(now_ms) {
            self.wink = Wink::None;
        }
    }

    fn tick_glance(&mut self, now_ms: f64) {
        if self.glance_timer.fire(now_ms) {
            let active = self.active_mood();
            if active != Mood::Pondering && active != Mood::Sleeping {
                self.distraction = Some(Vec2::ZERO);
                self.glance_end.schedule(
                    now_ms,
                    GLANCE_HOLD_MIN_MS + self.rng.gen::<f64>() * GLANCE_HOLD_JITTER_MS,
                );
            }
            self.glance_timer
                .schedule(now_ms, GLANCE_MIN_MS + self.rng.gen::<f64>() * GLANCE_JITTER_MS);
        }

        if self.glance_end.fire(now_ms) {
            self.distraction = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::konami::KONAMI_CODE;
    use pretty_assertions::assert_eq;

    fn mascot(base: Mood) -> Mascot {
        Mascot::with_seed(0.0, base, 99)
    }

    /// Tick every 100ms from `from` through `to`.
    fn run(mascot: &mut Mascot, from_ms: f64, to_ms: f64) {
        let mut t = from_ms;
        while t <= to_ms {
            mascot.tick(t);
            t += 100.0;
        }
    }

    #[test]
    fn test_end_to_end_boredom_scenario() {
        let mut m = mascot(Mood::Pensive);

        // No input for ~10s: exactly one yawning event.
        run(&mut m, 0.0, 10_000.0);
        let events = m.drain_events();
        assert_eq!(
            events,
            vec![MascotEvent::Boredom {
                level: crate::types::BoredomLevel::Yawning
            }]
        );
        assert!(m.snapshot().is_yawning);

        // 1.2s later the yawn closes into sleep with one idle event.
        run(&mut m, 10_100.0, 11_400.0);
        let events = m.drain_events();
        assert_eq!(events, vec![MascotEvent::Idle]);
        assert_eq!(m.active_mood(), Mood::Sleeping);

        // A click wakes it: wake first, then the click-tier event.
        m.clicked(11_500.0);
        let events = m.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], MascotEvent::Wake);
        assert_eq!(events[1], MascotEvent::Click);
        assert_eq!(
            m.snapshot().boredom_level,
            crate::types::BoredomLevel::Awake
        );
    }

    #[test]
    fn test_konami_override_outranks_sleep() {
        let mut m = mascot(Mood::Pensive);

        // Fall asleep.
        run(&mut m, 0.0, 13_000.0);
        assert_eq!(m.active_mood(), Mood::Sleeping);

        // Konami (wakes, then overrides).
        for key in KONAMI_CODE {
            m.key_down(13_100.0, key);
        }
        assert_eq!(m.active_mood(), Mood::Confident);

        let events = m.drain_events();
        assert!(events.contains(&MascotEvent::Wake));
        assert!(events.contains(&MascotEvent::Konami));
        assert!(m.snapshot().konami_active);

        // Expires after 5s, base mood resumes.
        run(&mut m, 13_200.0, 19_000.0);
        assert_eq!(m.active_mood(), Mood::Pensive);
        assert!(!m.snapshot().konami_active);
    }

    #[test]
    fn test_shake_makes_dizzy_then_recovers() {
        let mut m = mascot(Mood::Pensive);

        let mut x = 0.0_f32;
        for i in 0..40 {
            x += if i % 2 == 0 { 60.0 } else { -60.0 };
            m.pointer_moved(i as f64 * 16.0, Vec2::new(x, 100.0));
        }
        assert_eq!(m.active_mood(), Mood::Dizzy);
        assert!(m.drain_events().contains(&MascotEvent::Dizzy));

        run(&mut m, 700.0, 4_000.0);
        assert_eq!(m.active_mood(), Mood::Pensive);
    }

    #[test]
    fn test_double_click_spins_without_counting() {
        let mut m = mascot(Mood::Pensive);

        m.clicked(1_000.0);
        m.clicked(1_150.0);
        let events = m.drain_events();
        assert!(events.contains(&MascotEvent::DoubleClick));
        assert!(m.snapshot().is_spinning);

        run(&mut m, 1_200.0, 1_700.0);
        assert!(!m.snapshot().is_spinning);
    }

    #[test]
    fn test_spring_tracks_pointer_when_trackable() {
        let mut m = mascot(Mood::Pensive);
        m.set_center(Vec2::new(100.0, 100.0));
        m.pointer_moved(10.0, Vec2::new(200.0, 100.0));

        for _ in 0..200 {
            m.frame();
        }
        let offset = m.snapshot().eye_offset;
        assert!(offset[0] > 1.9, "pupils should look right, got {:?}", offset);
    }

    #[test]
    fn test_non_trackable_mood_forces_origin() {
        let mut m = mascot(Mood::Pensive);
        m.set_center(Vec2::new(100.0, 100.0));
        m.pointer_moved(10.0, Vec2::new(300.0, 100.0));

        m.set_mood(20.0, Mood::Pondering);
        for _ in 0..300 {
            m.frame();
        }
        let offset = m.snapshot().eye_offset;
        assert!(offset[0].abs() < 1e-2);
        assert!(offset[1].abs() < 1e-2);
    }

    #[test]
    fn test_missing_center_skips_gaze_update() {
        let mut m = mascot(Mood::Pensive);
        m.pointer_moved(10.0, Vec2::new(500.0, 500.0));

        for _ in 0..100 {
            m.frame();
        }
        assert_eq!(m.snapshot().eye_offset, [0.0, 0.0]);
    }

    #[test]
    fn test_entrance_flag_clears() {
        let mut m = mascot(Mood::Pensive);
        assert!(m.snapshot().is_entering);
        run(&mut m, 0.0, 700.0);
        assert!(!m.snapshot().is_entering);
    }

    #[test]
    fn test_blinks_eventually_happen() {
        let mut m = mascot(Mood::Pensive);
        let mut saw_blink_or_wink = false;

        let mut t = 0.0;
        while t < 30_000.0 {
            m.tick(t);
            let snap = m.snapshot();
            if snap.blink || snap.wink != Wink::None {
                saw_blink_or_wink = true;
            }
            t += 50.0;
        }
        assert!(saw_blink_or_wink);
    }

    #[test]
    fn test_success_jump_and_reset() {
        let mut m = mascot(Mood::Pensive);

        m.trigger_success(1_000.0);
        assert_eq!(m.active_mood(), Mood::Delighted);
        assert!(m.snapshot().is_jumping);

        run(&mut m, 1_100.0, 1_700.0);
        assert!(!m.snapshot().is_jumping);
        assert_eq!(m.active_mood(), Mood::Delighted);

        run(&mut m, 1_800.0, 3_300.0);
        assert_eq!(m.active_mood(), Mood::Pensive);

        // Reset clears immediately, including the override.
        m.trigger_success(4_000.0);
        m.reset_success();
        assert_eq!(m.active_mood(), Mood::Pensive);
        assert!(!m.snapshot().is_jumping);
    }

    #[test]
    fn test_success_blocked_while_override_active() {
        let mut m = mascot(Mood::Pensive);
        m.clicked(1_000.0);
        let before = m.active_mood();

        m.trigger_success(1_100.0);
        assert_eq!(m.active_mood(), before);
        assert!(!m.snapshot().is_jumping);
    }

    #[test]
    fn test_delighted_base_mood_sparkles() {
        let mut m = mascot(Mood::Pensive);
        m.set_mood(1_000.0, Mood::Delighted);
        assert!(m.snapshot().show_sparkles);

        run(&mut m, 1_100.0, 2_200.0);
        assert!(!m.snapshot().show_sparkles);
    }

    #[test]
    fn test_scroll_progress_shapes_reading_mouth() {
        let mut m = mascot(Mood::Reading);
        m.scrolled(0.0);
        assert!((m.snapshot().reading_mouth_curve + 1.0).abs() < 1e-6);
        m.scrolled(1.0);
        assert!((m.snapshot().reading_mouth_curve - 1.5).abs() < 1e-6);
    }
}
