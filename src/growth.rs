//! Size multiplier arithmetic for the growing sprite.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sprite scale in hundredths, so `100` is `1.0x`.
///
/// Fixed-point keeps `1.0 + 0.1 * n` exact no matter how many matches
/// and shrink ticks were interleaved.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct SizeMultiplier(u32);

/// Added on every correct word.
pub const GROWTH_STEP: SizeMultiplier = SizeMultiplier(10);

impl SizeMultiplier {
    /// Floor of the multiplier; the sprite is never drawn smaller than this.
    pub const BASE: SizeMultiplier = SizeMultiplier(100);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / 100.0
    }

    pub fn is_above_base(self) -> bool {
        self > Self::BASE
    }

    pub fn grow(self) -> Self {
        Self(self.0.saturating_add(GROWTH_STEP.0))
    }

    /// Subtract `step`, never going below [`SizeMultiplier::BASE`].
    pub fn shrink(self, step: SizeMultiplier) -> Self {
        Self(self.0.saturating_sub(step.0).max(Self::BASE.0))
    }

    /// One decimal place, rounded half up: `1.25` reads as `1.3x`.
    pub fn label(self) -> String {
        let tenths = (self.0 + 5) / 10;
        format!("{}.{}x", tenths / 10, tenths % 10)
    }
}

impl Default for SizeMultiplier {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for SizeMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
