//! Named difficulty presets.

use std::fmt;
use std::str::FromStr;

use brawl_common::ParseDifficultyError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Difficulty preset applied to an NPC controller at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    /// Slow decisions, timid.
    Easy,
    /// Baseline.
    #[default]
    Normal,
    /// Fast decisions, aggressive.
    Hard,
}

/// Tuning values a [`Difficulty`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    /// Seconds between decisions.
    pub decision_cooldown: f32,
    /// Scales the aggressiveness coefficient.
    pub aggressiveness_multiplier: f32,
    /// Scales the intelligence coefficient.
    pub intelligence_multiplier: f32,
}

impl Difficulty {
    /// All presets, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Upper-case label (`EASY`, `NORMAL`, `HARD`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Normal => "NORMAL",
            Self::Hard => "HARD",
        }
    }

    /// Tuning values for this preset.
    #[must_use]
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                decision_cooldown: 1.0,
                aggressiveness_multiplier: 0.7,
                intelligence_multiplier: 0.6,
            },
            Self::Normal => DifficultySettings {
                decision_cooldown: 0.5,
                aggressiveness_multiplier: 1.0,
                intelligence_multiplier: 1.0,
            },
            Self::Hard => DifficultySettings {
                decision_cooldown: 0.3,
                aggressiveness_multiplier: 1.3,
                intelligence_multiplier: 1.4,
            },
        }
    }

    /// Parses a label, falling back to [`Difficulty::Normal`] on anything
    /// unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|err: ParseDifficultyError| {
            warn!("{err}, using NORMAL");
            Self::Normal
        })
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDifficultyError {
                label: s.to_string(),
            })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
