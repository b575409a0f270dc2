//! Enemy AI.
//!
//! An [`NpcController`] re-evaluates its [`AiState`] on a fixed cadence and
//! runs the current state's behavior every tick, emitting an
//! [`Intent`](crate::intent::Intent) for the host to carry out.

pub mod controller;
pub mod difficulty;
pub mod state;

pub use controller::{NpcController, HEAVY_HIT_THRESHOLD};
pub use difficulty::{Difficulty, DifficultySettings};
pub use state::{
    decide, execute, AiState, Behavior, BehaviorContext, DecisionContext, Personality,
    ATTACK_COOLDOWN, ATTACK_RANGE, RETREAT_THRESHOLD, SAFE_DISTANCE, SPECIAL_CHANCE,
    SPECIAL_COOLDOWN,
};
