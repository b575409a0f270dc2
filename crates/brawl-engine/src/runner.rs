//! Headless match runner.
//!
//! Plays a match between a scripted player and the NPC, round after round,
//! and reports what happened.

use std::fmt;

use brawl_combat::{
    AttackKind, CombatEvent, Encounter, Outcome, PlayerInput, RandomSource, ATTACK_RANGE,
};
use brawl_common::Side;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::timing::StepTimer;

/// Attack rotation used by the autopilot.
const COMBO: [AttackKind; 4] = [
    AttackKind::Light,
    AttackKind::Light,
    AttackKind::Medium,
    AttackKind::Heavy,
];

/// Scripted player: walks into range and swings through a combo. Blocks
/// incoming attacks once badly hurt.
#[derive(Debug, Clone)]
pub struct Autopilot {
    preferred_gap: f32,
    swing_every: u32,
    frame: u32,
    combo_index: usize,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            preferred_gap: ATTACK_RANGE,
            swing_every: 12,
            frame: 0,
            combo_index: 0,
        }
    }
}

impl Autopilot {
    /// Input for this frame.
    pub fn input<R>(&mut self, encounter: &Encounter<R>) -> PlayerInput {
        self.frame = self.frame.wrapping_add(1);
        let (Some(me), Some(foe)) = (encounter.body(Side::Player), encounter.body(Side::Enemy))
        else {
            return PlayerInput::default();
        };

        let gap = foe.position.x - me.position.x;
        let hurt = encounter.stats(Side::Player).health_ratio() < 0.2;
        let mut input = PlayerInput::default();

        if gap.abs() > self.preferred_gap {
            input.move_right = gap > 0.0;
            input.move_left = gap < 0.0;
        } else if hurt && encounter.active_attack(Side::Enemy).is_some() {
            input.block = true;
        } else if self.frame % self.swing_every == 0
            && encounter.active_attack(Side::Player).is_none()
        {
            input.attack = Some(COMBO[self.combo_index % COMBO.len()]);
            self.combo_index += 1;
        }
        // turn around if the enemy got behind
        if gap.abs() <= self.preferred_gap && (gap > 0.0) != me.facing_right {
            input.move_right = gap > 0.0;
            input.move_left = gap < 0.0;
        }
        input
    }

    /// Starts over for a new round.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.combo_index = 0;
    }
}

/// How one round went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// Round number.
    pub round: u32,
    /// Result from the player's side.
    pub outcome: Outcome,
    /// Decided on health after the time limit rather than by knockout.
    pub timed_out: bool,
    /// Simulated seconds.
    pub duration: f32,
    /// Player health at the end.
    pub player_health: i32,
    /// Enemy health at the end.
    pub enemy_health: i32,
    /// Hits the player landed.
    pub player_hits: u32,
    /// Hits the enemy landed.
    pub enemy_hits: u32,
}

/// How the whole match went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Seed the AI drew from.
    pub seed: u64,
    /// Difficulty label.
    pub difficulty: String,
    /// Whether fixed-timestep stepping was used.
    pub fixed_timestep: bool,
    /// Per-round reports.
    pub rounds: Vec<RoundReport>,
    /// Match winner.
    pub winner: Side,
    /// Simulation steps taken.
    pub steps: u64,
    /// Effective damage dealt by both sides.
    pub total_damage: u64,
    /// Events dropped because the bus was full.
    pub dropped_events: u64,
}

impl MatchSummary {
    /// Rounds the player won.
    #[must_use]
    pub fn rounds_won(&self) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.outcome == Outcome::Victory)
            .count()
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Match: {} wins ({} of {} rounds won) [{}, seed {}, {}]",
            self.winner,
            self.rounds_won(),
            self.rounds.len(),
            self.difficulty,
            self.seed,
            if self.fixed_timestep {
                "fixed timestep"
            } else {
                "per-frame"
            },
        )?;
        for r in &self.rounds {
            writeln!(
                f,
                "  round {}: {}{} after {:.1}s, hp {} vs {}, hits {} vs {}",
                r.round,
                r.outcome,
                if r.timed_out { " (time)" } else { "" },
                r.duration,
                r.player_health,
                r.enemy_health,
                r.player_hits,
                r.enemy_hits,
            )?;
        }
        write!(
            f,
            "  {} steps, {} total damage, {} events dropped",
            self.steps, self.total_damage, self.dropped_events
        )
    }
}

/// Drives encounters round by round.
#[derive(Debug)]
pub struct MatchRunner {
    config: EngineConfig,
    timing: StepTimer,
    autopilot: Autopilot,
    seed: u64,
}

impl MatchRunner {
    /// Creates a runner. Without a configured seed one is picked at random.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        Self {
            timing: StepTimer::new(config.target_fps),
            config,
            autopilot: Autopilot::default(),
            seed,
        }
    }

    /// Seed in use.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Plays the match to the end.
    pub fn run(&mut self) -> MatchSummary {
        let mut encounter = Encounter::seeded(
            self.config.encounter_config(),
            self.config.player_stats(),
            self.config.enemy_stats(1),
            self.seed,
        );
        info!(
            seed = self.seed,
            difficulty = %encounter.npc().difficulty(),
            rounds = self.config.max_rounds,
            "match starting"
        );

        let mut rounds = Vec::new();
        let mut steps = 0;
        loop {
            let (report, round_steps) = self.play_round(&mut encounter);
            steps += round_steps;
            let outcome = report.outcome;
            rounds.push(report);

            if outcome == Outcome::Defeat || rounds.len() >= self.config.max_rounds as usize {
                break;
            }
            let next = encounter.round() + 1;
            encounter.next_round(self.config.enemy_stats(next));
            encounter.drain_events();
            self.autopilot.reset();
            self.timing.reset();
        }

        let winner = if rounds.iter().all(|r| r.outcome == Outcome::Victory) {
            Side::Player
        } else {
            Side::Enemy
        };
        info!(%winner, rounds = rounds.len(), "match finished");

        MatchSummary {
            seed: self.seed,
            difficulty: encounter.npc().difficulty().label().to_string(),
            fixed_timestep: self.config.fixed_timestep,
            rounds,
            winner,
            steps,
            total_damage: encounter.resolver().damage_dealt(),
            dropped_events: encounter.events().dropped(),
        }
    }

    fn play_round<R: RandomSource>(&mut self, encounter: &mut Encounter<R>) -> (RoundReport, u64) {
        let round = encounter.round();
        let frame_dt = self.timing.frame_dt();
        let step = self.timing.step();
        let mut elapsed = 0.0;
        let mut steps = 0;
        let mut hits = [0u32; 2];
        info!(round, "round starting");

        let outcome = loop {
            let input = self.autopilot.input(encounter);
            let mut outcome = None;
            if self.config.fixed_timestep {
                for _ in 0..self.timing.accumulate(frame_dt) {
                    outcome = encounter.step(step, &input);
                    steps += 1;
                    if outcome.is_some() {
                        break;
                    }
                }
            } else {
                outcome = encounter.step(frame_dt, &input);
                steps += 1;
            }
            elapsed += frame_dt;

            for event in encounter.drain_events() {
                if let CombatEvent::Hit { hit, .. } = &event {
                    match hit.attacker.side() {
                        Some(Side::Player) => hits[0] += 1,
                        Some(Side::Enemy) => hits[1] += 1,
                        None => {},
                    }
                }
                if self.config.log_events {
                    debug!(?event, "combat event");
                }
            }

            if let Some(outcome) = outcome {
                break (outcome, false);
            }
            if elapsed >= self.config.round_time_limit {
                break (decide_on_health(encounter), true);
            }
        };

        let report = RoundReport {
            round,
            outcome: outcome.0,
            timed_out: outcome.1,
            duration: elapsed,
            player_health: encounter.stats(Side::Player).health(),
            enemy_health: encounter.stats(Side::Enemy).health(),
            player_hits: hits[0],
            enemy_hits: hits[1],
        };
        info!(
            round,
            outcome = %report.outcome,
            timed_out = report.timed_out,
            duration = report.duration,
            "round finished"
        );
        if self.config.log_events {
            match encounter.snapshot().to_json() {
                Ok(json) => debug!(%json, "final round state"),
                Err(err) => warn!(%err, "could not encode round state"),
            }
        }
        (report, steps)
    }
}

/// Time-limit decision. Only a strict health lead wins; a tie goes to the
/// enemy.
fn decide_on_health<R>(encounter: &Encounter<R>) -> Outcome {
    let player = encounter.stats(Side::Player).health();
    let enemy = encounter.stats(Side::Enemy).health();
    if player > enemy {
        Outcome::Victory
    } else {
        Outcome::Defeat
    }
}
