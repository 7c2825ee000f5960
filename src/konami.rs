//! Konami code detection
//!
//! Tracks an index into the fixed key sequence. A match advances, a mismatch
//! resets to zero with no partial credit. Completing the sequence is reported
//! to the engine, which installs the override mood and its expiry.

use tracing::info;

/// The fixed unlock sequence. Letter keys are case-sensitive.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// How long the unlocked override mood lasts.
pub const KONAMI_DURATION_MS: f64 = 5_000.0;

#[derive(Debug, Default)]
pub struct KonamiDetector {
    index: usize,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Feed one keydown. Returns `true` when the full sequence completes; the
    /// index resets immediately so the code can be re-triggered.
    pub fn key_down(&mut self, key: &str) -> bool {
        if key == KONAMI_CODE[self.index] {
            self.index += 1;
            if self.index == KONAMI_CODE.len() {
                info!("konami code entered");
                self.index = 0;
                return true;
            }
        } else {
            self.index = 0;
        }
        false
    }
}
