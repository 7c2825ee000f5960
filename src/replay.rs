//! Recorded interaction sessions and deterministic replay
//!
//! A session is a wall-clock-stamped recording of raw user inputs
//! (`mascot.session.v1`). Replay converts the timestamps to engine
//! milliseconds relative to the session start and drives a seeded engine
//! through them on a fixed tick cadence, so the same session and seed always
//! produce the same event stream.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::Mascot;
use crate::error::MascotError;
use crate::types::{MascotEvent, MascotSnapshot, Mood};

/// Session schema identifier.
pub const SESSION_SCHEMA_VERSION: &str = "mascot.session.v1";

/// Replay tick cadence. Comfortably under the 1-second boredom poll, and the
/// spring advances one frame per tick.
const REPLAY_TICK_MS: f64 = 50.0;

/// A recorded interaction session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSession {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_mood: Mood,
    pub events: Vec<InteractionEvent>,
}

fn default_schema_version() -> String {
    SESSION_SCHEMA_VERSION.to_string()
}

/// One recorded input with its wall-clock timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: InteractionEventKind,
}

/// Raw user inputs a session can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEventKind {
    PointerMove { x: f32, y: f32 },
    PointerEnter,
    PointerLeave,
    Click,
    KeyDown { key: String },
    Scroll { progress: f32 },
    SetMood { mood: Mood },
}

impl InteractionSession {
    /// Start an empty recording now.
    pub fn new(base_mood: Mood) -> Self {
        Self {
            schema_version: default_schema_version(),
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            base_mood,
            events: Vec::new(),
        }
    }

    /// Parse and validate a session from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, MascotError> {
        let session: InteractionSession = serde_json::from_str(raw)?;
        session.validate()?;
        Ok(session)
    }

    /// Parse one event per line and wrap them in a fresh session.
    ///
    /// The session starts at the first event's timestamp.
    pub fn from_ndjson(raw: &str, base_mood: Mood) -> Result<Self, MascotError> {
        let mut events = Vec::new();
        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event: InteractionEvent = serde_json::from_str(trimmed)?;
            events.push(event);
        }

        let started_at = events
            .first()
            .map(|e| e.timestamp)
            .unwrap_or_else(Utc::now);

        let session = Self {
            schema_version: default_schema_version(),
            session_id: Uuid::new_v4(),
            started_at,
            base_mood,
            events,
        };
        session.validate()?;
        Ok(session)
    }

    /// Check the schema version and timestamp ordering.
    pub fn validate(&self) -> Result<(), MascotError> {
        if self.schema_version != SESSION_SCHEMA_VERSION {
            return Err(MascotError::InvalidSession(format!(
                "unsupported schema version '{}', expected '{}'",
                self.schema_version, SESSION_SCHEMA_VERSION
            )));
        }

        let mut prev = self.started_at;
        for (index, event) in self.events.iter().enumerate() {
            if event.timestamp < prev {
                return Err(MascotError::OutOfOrderEvent { index });
            }
            prev = event.timestamp;
        }

        Ok(())
    }

    /// Wall-clock length of the recording.
    pub fn duration_ms(&self) -> f64 {
        self.events
            .last()
            .map(|e| (e.timestamp - self.started_at).num_milliseconds() as f64)
            .unwrap_or(0.0)
    }
}

/// An engine event observed during replay, stamped with both clocks.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayedEvent {
    pub timestamp: DateTime<Utc>,
    pub offset_ms: f64,
    pub event: MascotEvent,
}

/// The full outcome of a deterministic replay.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub producer: &'static str,
    pub engine_version: &'static str,
    pub session_id: Uuid,
    pub base_mood: Mood,
    pub seed: u64,
    pub events: Vec<ReplayedEvent>,
    pub final_snapshot: MascotSnapshot,
}

/// Drive a seeded engine through a recorded session.
///
/// `trailing_ms` keeps ticking past the last input, so idle-driven behavior
/// (boredom escalation, mood-override expiry) still lands in the report.
pub fn replay(
    session: &InteractionSession,
    seed: u64,
    trailing_ms: f64,
) -> Result<ReplayReport, MascotError> {
    session.validate()?;
    info!(
        session_id = %session.session_id,
        events = session.events.len(),
        "replaying session"
    );

    let mut mascot = Mascot::with_seed(0.0, session.base_mood, seed);
    let mut replayed = Vec::new();
    let mut now_ms = 0.0_f64;

    let drain = |mascot: &mut Mascot, at_ms: f64, out: &mut Vec<ReplayedEvent>| {
        for event in mascot.drain_events() {
            out.push(ReplayedEvent {
                timestamp: session.started_at + Duration::milliseconds(at_ms as i64),
                offset_ms: at_ms,
                event,
            });
        }
    };

    for event in &session.events {
        let offset_ms = (event.timestamp - session.started_at).num_milliseconds() as f64;

        // Run the tick grid up to the input.
        while now_ms + REPLAY_TICK_MS <= offset_ms {
            now_ms += REPLAY_TICK_MS;
            mascot.tick(now_ms);
            mascot.frame();
            drain(&mut mascot, now_ms, &mut replayed);
        }

        match &event.kind {
            InteractionEventKind::PointerMove { x, y } => {
                mascot.pointer_moved(offset_ms, glam::Vec2::new(*x, *y));
            }
            InteractionEventKind::PointerEnter => mascot.pointer_entered(offset_ms),
            InteractionEventKind::PointerLeave => mascot.pointer_left(),
            InteractionEventKind::Click => mascot.clicked(offset_ms),
            InteractionEventKind::KeyDown { key } => mascot.key_down(offset_ms, key),
            InteractionEventKind::Scroll { progress } => mascot.scrolled(*progress),
            InteractionEventKind::SetMood { mood } => mascot.set_mood(offset_ms, *mood),
        }
        drain(&mut mascot, offset_ms, &mut replayed);
    }

    let end_ms = session.duration_ms() + trailing_ms;
    while now_ms + REPLAY_TICK_MS <= end_ms {
        now_ms += REPLAY_TICK_MS;
        mascot.tick(now_ms);
        mascot.frame();
        drain(&mut mascot, now_ms, &mut replayed);
    }

    Ok(ReplayReport {
        producer: crate::PRODUCER_NAME,
        engine_version: crate::ENGINE_VERSION,
        session_id: session.session_id,
        base_mood: session.base_mood,
        seed,
        events: replayed,
        final_snapshot: mascot.snapshot(),
    })
}
