//! Brawl Engine - headless runner for the Brawl combat core.
//!
//! This crate provides configuration loading, frame timing and a match
//! runner that plays scripted player input against the enemy AI.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod runner;
pub mod timing;

pub use config::{EngineConfig, CONFIG_ENV};
pub use runner::{Autopilot, MatchRunner, MatchSummary, RoundReport};
pub use timing::StepTimer;
