//! NPC controller: owns one enemy's decision state and drives it each tick.

use brawl_common::CombatantId;
use tracing::{debug, trace};

use crate::attack::{scale_power, strike_hitbox};
use crate::hitbox::Hitbox;
use crate::intent::Intent;
use crate::random::RandomSource;
use crate::resolver::Damageable;
use crate::space::{BodyId, SimulationSpace};
use crate::stats::CombatStats;

use super::difficulty::Difficulty;
use super::state::{
    decide, execute, AiState, BehaviorContext, DecisionContext, Personality, ATTACK_COOLDOWN,
    SPECIAL_COOLDOWN,
};

/// Hits above this much damage interrupt the NPC.
pub const HEAVY_HIT_THRESHOLD: i32 = 10;

/// Slack on the decision timer so that accumulated `f32` steps landing a
/// hair under the cooldown still count as reaching it.
const TIMER_EPSILON: f32 = 1e-5;

/// Decision state machine bound to one body and one stat record.
///
/// Generic over its random source so tests can script every draw.
#[derive(Debug, Clone)]
pub struct NpcController<R = fastrand::Rng> {
    id: CombatantId,
    body: BodyId,
    target: Option<BodyId>,
    stats: CombatStats,
    difficulty: Difficulty,
    personality: Personality,
    state: AiState,
    decision_cooldown: f32,
    since_decision: f32,
    attack_cooldown: f32,
    special_cooldown: f32,
    decisions: u64,
    rng: R,
}

impl<R: RandomSource> NpcController<R> {
    /// Creates a controller in [`AiState::Idle`] with no target.
    ///
    /// Difficulty multipliers are applied here, once.
    pub fn new(
        id: CombatantId,
        body: BodyId,
        stats: CombatStats,
        difficulty: Difficulty,
        rng: R,
    ) -> Self {
        let settings = difficulty.settings();
        let personality = Personality::from_stats(&stats).scaled(&settings);
        debug!(
            %id,
            %difficulty,
            aggressiveness = personality.aggressiveness,
            defensiveness = personality.defensiveness,
            "npc controller created"
        );
        Self {
            id,
            body,
            target: None,
            stats,
            difficulty,
            personality,
            state: AiState::Idle,
            decision_cooldown: settings.decision_cooldown,
            since_decision: 0.0,
            attack_cooldown: 0.0,
            special_cooldown: 0.0,
            decisions: 0,
            rng,
        }
    }

    /// Binds or clears the target body.
    pub fn set_target(&mut self, target: Option<BodyId>) {
        self.target = target;
    }

    /// Advances cooldowns, re-decides on cadence and returns this tick's
    /// intent.
    ///
    /// Without a target, or if either body is missing from `space`, nothing
    /// advances and the idle intent is returned.
    pub fn update(&mut self, dt: f32, space: &SimulationSpace) -> Intent {
        let Some(target) = self.target else {
            return Intent::IDLE;
        };
        let (Some(own), Some(other)) = (space.body(self.body), space.body(target)) else {
            return Intent::IDLE;
        };
        let (self_x, target_x) = (own.position.x, other.position.x);

        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        self.special_cooldown = (self.special_cooldown - dt).max(0.0);

        self.since_decision += dt;
        if self.since_decision + TIMER_EPSILON >= self.decision_cooldown {
            let ctx = DecisionContext {
                distance: space.distance(self.body, target).unwrap_or(f32::MAX),
                health_ratio: self.stats.health_ratio(),
                attack_cooldown: self.attack_cooldown,
                personality: self.personality,
            };
            let next = decide(&ctx, &mut self.rng);
            if next != self.state {
                debug!(id = %self.id, from = %self.state, to = %next, "npc state change");
            }
            self.state = next;
            self.since_decision = 0.0;
            self.decisions += 1;
        }

        let ctx = BehaviorContext {
            self_x,
            target_x,
            special_cooldown: self.special_cooldown,
        };
        let behavior = execute(self.state, &ctx, &mut self.rng);
        if behavior.spent_attack {
            self.attack_cooldown = ATTACK_COOLDOWN;
        }
        if behavior.spent_special {
            self.special_cooldown = SPECIAL_COOLDOWN;
        }

        if !behavior.intent.is_idle() {
            trace!(id = %self.id, state = %self.state, intent = ?behavior.intent, "npc intent");
        }
        behavior.intent
    }

    /// Applies resolved damage. Heavy hits force [`AiState::Defending`] and
    /// make the next [`update`](Self::update) re-decide immediately.
    pub fn take_damage(&mut self, amount: i32) {
        self.stats.lose_health(amount);
        if amount > HEAVY_HIT_THRESHOLD {
            debug!(id = %self.id, amount, "heavy hit, npc interrupted");
            self.state = AiState::Defending;
            self.since_decision = self.decision_cooldown;
        }
    }

    /// Hitbox in front of the body while attacking; `None` otherwise.
    #[must_use]
    pub fn attack_hitbox(&self, space: &SimulationSpace) -> Option<Hitbox> {
        if self.state != AiState::Attacking {
            return None;
        }
        let body = space.body(self.body)?;
        Some(strike_hitbox(body, scale_power(self.stats.damage(), 4, 5)))
    }

    /// Puts the controller back to its starting state with full health.
    /// The target binding is kept.
    pub fn reset(&mut self) {
        self.stats.restore();
        self.state = AiState::Idle;
        self.since_decision = 0.0;
        self.attack_cooldown = 0.0;
        self.special_cooldown = 0.0;
    }

    /// Rebinds the controller to a new fighter. Personality is derived again
    /// under the same difficulty and all timers start over; the random
    /// source and target carry across.
    pub fn respawn(&mut self, stats: CombatStats) {
        let settings = self.difficulty.settings();
        self.personality = Personality::from_stats(&stats).scaled(&settings);
        self.stats = stats;
        self.state = AiState::Idle;
        self.since_decision = 0.0;
        self.attack_cooldown = 0.0;
        self.special_cooldown = 0.0;
        self.decisions = 0;
        debug!(id = %self.id, "npc controller respawned");
    }

    /// Overrides the current state, for debug tooling.
    pub fn force_state(&mut self, state: AiState) {
        self.state = state;
    }
}

impl<R> NpcController<R> {
    /// Combatant id.
    pub fn id(&self) -> CombatantId {
        self.id
    }

    /// Controlled body.
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Bound target, if any.
    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    /// Current behavior state.
    pub fn state(&self) -> AiState {
        self.state
    }

    /// Own stats.
    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    /// Difficulty preset in effect.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Personality after difficulty scaling.
    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Seconds between decisions.
    pub fn decision_cooldown(&self) -> f32 {
        self.decision_cooldown
    }

    /// Seconds until a regular attack is allowed.
    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    /// Seconds until a special is allowed.
    pub fn special_cooldown(&self) -> f32 {
        self.special_cooldown
    }

    /// Number of decisions taken since construction.
    pub fn decisions(&self) -> u64 {
        self.decisions
    }
}

impl<R: RandomSource> Damageable for NpcController<R> {
    fn combat_stats(&self) -> &CombatStats {
        &self.stats
    }

    fn apply_damage(&mut self, amount: i32) {
        self.take_damage(amount);
    }
}
