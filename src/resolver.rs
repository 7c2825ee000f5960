//! Mood resolution and display-flag derivation
//!
//! All independent signal sources (override slot, shake dizziness, boredom
//! sleep, externally supplied base mood) are compiled once per resolution into
//! a single authoritative mood by strict priority, then mapped through one
//! explicit lookup table to the visual selection. No two visual states can be
//! active at once because the table is total over the closed mood set.

use serde::{Deserialize, Serialize};

use crate::types::Mood;

/// Compute the single active mood.
///
/// Priority, highest first: transient override, dizziness, idle sleep, base.
pub fn resolve_mood(
    override_mood: Option<Mood>,
    dizzy: bool,
    asleep: bool,
    base: Mood,
) -> Mood {
    if let Some(mood) = override_mood {
        mood
    } else if dizzy {
        Mood::Dizzy
    } else if asleep {
        Mood::Sleeping
    } else {
        base
    }
}

/// Which eye layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeStyle {
    /// Standard tracking pupils with blink.
    Blink,
    /// Pondering pupils (slightly offset, still tracking).
    Pondering,
    /// Left-right scanning eyes.
    Scan,
    /// Spiral eyes while dizzy.
    Spiral,
    /// Happy arcs.
    Happy,
    /// Closed lids.
    Closed,
    /// Squinted lids mid-yawn.
    Squint,
}

/// Which mouth layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthStyle {
    Neutral,
    Sleep,
    Smile,
    BigSmile,
    Think,
    /// Curve interpolated from scroll progress.
    Reading,
    Wavy,
    Open,
    Grit,
    Yawn,
}

/// Visual selection derived from the active mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    pub eyes: EyeStyle,
    pub mouth: MouthStyle,
    pub show_sunglasses: bool,
    pub show_furrowed_brows: bool,
    pub show_sweat_drops: bool,
    pub show_glint: bool,
    /// Gentle float animation (zen / delighted).
    pub floating: bool,
    /// Any continuous body animation is running.
    pub animating: bool,
}

impl DisplayFlags {
    /// The lookup table: one row per mood, yawning as the only modifier.
    pub fn for_mood(active: Mood, yawning: bool) -> DisplayFlags {
        let (eyes, mouth) = match active {
            Mood::Pensive => (EyeStyle::Blink, MouthStyle::Neutral),
            Mood::Confident => (EyeStyle::Blink, MouthStyle::Smile),
            Mood::Stressed => (EyeStyle::Blink, MouthStyle::Wavy),
            Mood::Determined => (EyeStyle::Blink, MouthStyle::Grit),
            Mood::Confused => (EyeStyle::Blink, MouthStyle::Wavy),
            Mood::Shocked => (EyeStyle::Blink, MouthStyle::Open),
            Mood::Sleeping => (EyeStyle::Closed, MouthStyle::Sleep),
            Mood::Kinetic => (EyeStyle::Blink, MouthStyle::Neutral),
            Mood::Zen => (EyeStyle::Blink, MouthStyle::Smile),
            Mood::Pondering => (EyeStyle::Pondering, MouthStyle::Think),
            Mood::Reading => (EyeStyle::Scan, MouthStyle::Reading),
            Mood::Delighted => (EyeStyle::Happy, MouthStyle::BigSmile),
            Mood::Dizzy => (EyeStyle::Spiral, MouthStyle::Wavy),
            Mood::Favicon => (EyeStyle::Blink, MouthStyle::Neutral),
        };

        // Mid-yawn visuals replace eyes and mouth, but never the dizzy spiral.
        let (eyes, mouth) = if yawning && active != Mood::Dizzy {
            (EyeStyle::Squint, MouthStyle::Yawn)
        } else {
            (eyes, mouth)
        };

        let floating = matches!(active, Mood::Zen | Mood::Delighted);

        DisplayFlags {
            eyes,
            mouth,
            show_sunglasses: active == Mood::Confident,
            show_furrowed_brows: active == Mood::Determined,
            show_sweat_drops: active == Mood::Stressed,
            show_glint: floating,
            floating,
            animating: floating || matches!(active, Mood::Kinetic | Mood::Pondering | Mood::Dizzy),
        }
    }
}
