//! Core types for the mascot engine
//!
//! This module defines the closed mood vocabulary, the boredom ladder, the
//! semantic event contract, and the render-boundary snapshot consumed by the
//! visual layer.

use serde::{Deserialize, Serialize};

use crate::resolver::DisplayFlags;

/// Closed set of named moods.
///
/// The base mood is externally driven (e.g. by page route); the engine layers
/// transient overrides, dizziness, and idle sleep on top of it. Unknown moods
/// are unrepresentable by construction, so no runtime validation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Pensive,
    Confident,
    Stressed,
    Determined,
    Confused,
    Shocked,
    Sleeping,
    Kinetic,
    Zen,
    Pondering,
    Reading,
    Delighted,
    Dizzy,
    Favicon,
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Pensive
    }
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Pensive => "pensive",
            Mood::Confident => "confident",
            Mood::Stressed => "stressed",
            Mood::Determined => "determined",
            Mood::Confused => "confused",
            Mood::Shocked => "shocked",
            Mood::Sleeping => "sleeping",
            Mood::Kinetic => "kinetic",
            Mood::Zen => "zen",
            Mood::Pondering => "pondering",
            Mood::Reading => "reading",
            Mood::Delighted => "delighted",
            Mood::Dizzy => "dizzy",
            Mood::Favicon => "favicon",
        }
    }

    /// Whether the pupils follow the pointer in this mood.
    ///
    /// Non-trackable moods force the gaze target back to origin.
    pub fn is_trackable(&self) -> bool {
        matches!(
            self,
            Mood::Pensive
                | Mood::Stressed
                | Mood::Determined
                | Mood::Confused
                | Mood::Shocked
                | Mood::Kinetic
                | Mood::Zen
                | Mood::Delighted
                | Mood::Favicon
        )
    }
}

/// Boredom escalation levels, ordered.
///
/// Transitions only move forward while idle and reset instantly to `Awake` on
/// any input. There is no terminal state: the ladder holds at `Dreaming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoredomLevel {
    Awake,
    Yawning,
    Sleeping,
    Snoring,
    Dreaming,
}

impl BoredomLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoredomLevel::Awake => "awake",
            BoredomLevel::Yawning => "yawning",
            BoredomLevel::Sleeping => "sleeping",
            BoredomLevel::Snoring => "snoring",
            BoredomLevel::Dreaming => "dreaming",
        }
    }
}

/// Semantic events reported to the host application.
///
/// Each event is emitted at most once per logical transition — never repeated
/// while the triggering condition persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MascotEvent {
    Click,
    DoubleClick,
    Konami,
    Idle,
    Wake,
    Dizzy,
    Boredom { level: BoredomLevel },
    Annoyed,
}

/// Which eye is winking, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wink {
    None,
    Left,
    Right,
}

impl Default for Wink {
    fn default() -> Self {
        Wink::None
    }
}

/// Pure render-boundary snapshot, produced once per resolution tick.
///
/// The visual layer (SVG/CSS) consumes this and holds no behavioral state of
/// its own.
#[derive(Debug, Clone, Serialize)]
pub struct MascotSnapshot {
    /// The single authoritative mood driving visual output.
    pub active_mood: Mood,
    /// Eye/mouth/accessory selection derived from the active mood.
    pub display: DisplayFlags,
    /// Pupil offset from the spring integrator, in viewBox units.
    pub eye_offset: [f32; 2],
    /// Body lean toward the pointer while hovering (degrees, ±8).
    pub lean_angle: f32,
    /// Curious head tilt (degrees, ∓12 opposite the lean).
    pub head_tilt: f32,
    pub is_hovering: bool,
    pub is_squinting: bool,
    pub is_shy: bool,
    pub is_spinning: bool,
    pub is_jumping: bool,
    pub is_entering: bool,
    pub is_yawning: bool,
    pub konami_active: bool,
    pub show_sparkles: bool,
    pub blink: bool,
    pub wink: Wink,
    pub boredom_level: BoredomLevel,
    /// Thought-bubble icon shown while dreaming.
    pub dream_icon: &'static str,
    /// Reading progress (0-1) from scroll position.
    pub scroll_progress: f32,
    /// Reading-mouth curvature: -1 (frown) to 1.5 (smile) over scroll progress.
    pub reading_mouth_curve: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mood_serialization() {
        let json = serde_json::to_string(&Mood::Delighted).unwrap();
        assert_eq!(json, "\"delighted\"");

        let parsed: Mood = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Mood::Delighted);
    }

    #[test]
    fn test_unknown_mood_rejected() {
        let result: Result<Mood, _> = serde_json::from_str("\"grumpy\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_event_tagged_serialization() {
        let json = serde_json::to_string(&MascotEvent::DoubleClick).unwrap();
        assert_eq!(json, "{\"type\":\"double-click\"}");

        let json = serde_json::to_string(&MascotEvent::Boredom {
            level: BoredomLevel::Snoring,
        })
        .unwrap();
        assert_eq!(json, "{\"type\":\"boredom\",\"level\":\"snoring\"}");
    }

    #[test]
    fn test_boredom_levels_ordered() {
        assert!(BoredomLevel::Awake < BoredomLevel::Yawning);
        assert!(BoredomLevel::Yawning < BoredomLevel::Sleeping);
        assert!(BoredomLevel::Sleeping < BoredomLevel::Snoring);
        assert!(BoredomLevel::Snoring < BoredomLevel::Dreaming);
    }

    #[test]
    fn test_sleeping_is_not_trackable() {
        assert!(!Mood::Sleeping.is_trackable());
        assert!(!Mood::Pondering.is_trackable());
        assert!(!Mood::Dizzy.is_trackable());
        assert!(Mood::Pensive.is_trackable());
    }
}
