//! Behavior states and the two pure functions over them.
//!
//! [`decide`] picks the next state from a combat snapshot; [`execute`]
//! turns the current state into this tick's intent. Neither touches the
//! controller, so both can be driven directly with a scripted random source.

use serde::{Deserialize, Serialize};

use crate::body::Direction;
use crate::intent::Intent;
use crate::random::RandomSource;
use crate::stats::CombatStats;

use super::difficulty::DifficultySettings;

/// Distance at which the NPC will commit to an attack.
pub const ATTACK_RANGE: f32 = 80.0;
/// Beyond this distance the NPC closes in.
pub const SAFE_DISTANCE: f32 = 120.0;
/// Health ratio under which retreating becomes possible.
pub const RETREAT_THRESHOLD: f32 = 0.3;
/// Chance to pick a special attack when nothing else applies.
pub const SPECIAL_CHANCE: f32 = 0.10;
/// Cooldown after a regular attack, in seconds. Not scaled by difficulty.
pub const ATTACK_COOLDOWN: f32 = 1.0;
/// Cooldown after a special attack, in seconds.
pub const SPECIAL_COOLDOWN: f32 = 5.0;

const IDLE_JUMP_CHANCE: f32 = 0.10;
const APPROACH_JUMP_CHANCE: f32 = 0.05;
const DEFEND_SHUFFLE_CHANCE: f32 = 0.30;
const RETREAT_JUMP_CHANCE: f32 = 0.20;

/// High-level behavior of an NPC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Standing around, occasionally hopping.
    #[default]
    Idle,
    /// Walking toward the target.
    Approaching,
    /// Swinging at the target when in reach.
    Attacking,
    /// Blocking, sometimes backing off a step.
    Defending,
    /// Running away and jumping.
    Retreating,
    /// Throwing the special attack.
    SpecialAttack,
}

impl AiState {
    /// Label for debug overlays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Approaching => "approaching",
            Self::Attacking => "attacking",
            Self::Defending => "defending",
            Self::Retreating => "retreating",
            Self::SpecialAttack => "special_attack",
        }
    }
}

impl std::fmt::Display for AiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Coefficients derived once from a stat record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// Chance to attack rather than defend when in range.
    pub aggressiveness: f32,
    /// Chance to retreat when badly hurt.
    pub defensiveness: f32,
    /// General cunning. Reported, not yet consulted by any behavior.
    pub intelligence: f32,
}

impl Personality {
    /// Derives coefficients from `stats`.
    #[must_use]
    pub fn from_stats(stats: &CombatStats) -> Self {
        let damage = stats.damage() as f32;
        let resistance = stats.resistance() as f32;
        let health = stats.health() as f32;
        Self {
            aggressiveness: ((damage + resistance) / 200.0).min(1.0),
            defensiveness: (resistance / 100.0).min(1.0),
            intelligence: ((damage + health) / 200.0).min(1.0),
        }
    }

    /// Applies difficulty multipliers. Results stay within `[0, 1]`.
    #[must_use]
    pub fn scaled(self, settings: &DifficultySettings) -> Self {
        Self {
            aggressiveness: (self.aggressiveness * settings.aggressiveness_multiplier)
                .clamp(0.0, 1.0),
            defensiveness: self.defensiveness,
            intelligence: (self.intelligence * settings.intelligence_multiplier).clamp(0.0, 1.0),
        }
    }
}

/// What the decision procedure looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    /// Center-to-center distance to the target.
    pub distance: f32,
    /// Own health over max health.
    pub health_ratio: f32,
    /// Seconds until a regular attack is allowed again.
    pub attack_cooldown: f32,
    /// Personality coefficients.
    pub personality: Personality,
}

/// Picks the next state.
///
/// Each branch that needs randomness draws once, and only if the checks
/// before it already passed, so the branch order shapes the distribution.
pub fn decide<R: RandomSource + ?Sized>(ctx: &DecisionContext, rng: &mut R) -> AiState {
    if ctx.health_ratio < RETREAT_THRESHOLD && rng.chance(ctx.personality.defensiveness) {
        AiState::Retreating
    } else if ctx.distance <= ATTACK_RANGE && ctx.attack_cooldown <= 0.0 {
        if rng.chance(ctx.personality.aggressiveness) {
            AiState::Attacking
        } else {
            AiState::Defending
        }
    } else if ctx.distance > SAFE_DISTANCE {
        AiState::Approaching
    } else if rng.chance(SPECIAL_CHANCE) {
        AiState::SpecialAttack
    } else {
        AiState::Idle
    }
}

/// What a state's behavior looks at each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorContext {
    /// Own x.
    pub self_x: f32,
    /// Target's x.
    pub target_x: f32,
    /// Seconds until a special is allowed again.
    pub special_cooldown: f32,
}

impl BehaviorContext {
    /// Horizontal gap between the two left edges.
    #[must_use]
    pub fn reach(&self) -> f32 {
        (self.self_x - self.target_x).abs()
    }

    fn toward(&self) -> Direction {
        Direction::toward(self.self_x, self.target_x)
    }
}

/// Result of running a state's behavior for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behavior {
    /// Flags for the host.
    pub intent: Intent,
    /// A regular attack was spent; its cooldown restarts.
    pub spent_attack: bool,
    /// A special was spent; its cooldown restarts.
    pub spent_special: bool,
}

impl From<Intent> for Behavior {
    fn from(intent: Intent) -> Self {
        Self {
            intent,
            ..Self::default()
        }
    }
}

/// Runs `state`'s behavior for one tick.
pub fn execute<R: RandomSource + ?Sized>(
    state: AiState,
    ctx: &BehaviorContext,
    rng: &mut R,
) -> Behavior {
    match state {
        AiState::Idle => Intent {
            jump: rng.chance(IDLE_JUMP_CHANCE),
            ..Intent::IDLE
        }
        .into(),
        AiState::Approaching => Intent {
            jump: rng.chance(APPROACH_JUMP_CHANCE),
            ..Intent::moving(ctx.toward())
        }
        .into(),
        AiState::Attacking => {
            if ctx.reach() <= ATTACK_RANGE {
                Behavior {
                    intent: Intent {
                        attack: true,
                        ..Intent::IDLE
                    },
                    spent_attack: true,
                    spent_special: false,
                }
            } else {
                Behavior::default()
            }
        }
        AiState::Defending => {
            let mut intent = if rng.chance(DEFEND_SHUFFLE_CHANCE) {
                Intent::moving(ctx.toward().reversed())
            } else {
                Intent::IDLE
            };
            intent.block = true;
            intent.into()
        }
        AiState::Retreating => Intent {
            jump: rng.chance(RETREAT_JUMP_CHANCE),
            ..Intent::moving(ctx.toward().reversed())
        }
        .into(),
        AiState::SpecialAttack => {
            if ctx.special_cooldown <= 0.0 {
                Behavior {
                    intent: Intent {
                        special: true,
                        ..Intent::IDLE
                    },
                    spent_attack: false,
                    spent_special: true,
                }
            } else {
                Behavior::default()
            }
        }
    }
}
