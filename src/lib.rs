//! Mascot Engine - Deterministic behavioral core for an interactive mascot
//!
//! The engine turns raw user inputs (pointer, keyboard, clicks, scroll) into a
//! single authoritative mood and a pure render snapshot through a deterministic
//! pipeline: gesture detection → boredom escalation → mood resolution →
//! display derivation, with a spring integrator driving pupil tracking.
//!
//! ## Modules
//!
//! - **Engine**: The `Mascot` orchestrator, ticked on injected monotonic time
//! - **Detectors**: Shake, konami, click-tier, hover, and boredom tracking
//! - **Replay**: Recorded interaction sessions replayed deterministically

pub mod boredom;
pub mod click;
pub mod controller;
pub mod engine;
pub mod error;
pub mod hover;
pub mod konami;
pub mod replay;
pub mod resolver;
pub mod shake;
pub mod spring;
pub mod timer;
pub mod types;

pub use controller::MoodController;
pub use engine::Mascot;
pub use error::MascotError;
pub use replay::{
    replay, InteractionEvent, InteractionEventKind, InteractionSession, ReplayReport,
    ReplayedEvent, SESSION_SCHEMA_VERSION,
};
pub use resolver::{resolve_mood, DisplayFlags, EyeStyle, MouthStyle};
pub use types::{BoredomLevel, MascotEvent, MascotSnapshot, Mood, Wink};

/// Engine version embedded in replay reports and CLI output
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for replay reports
pub const PRODUCER_NAME: &str = "mascot-engine";
