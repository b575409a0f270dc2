//! One player-vs-enemy match.
//!
//! An [`Encounter`] owns the simulation space, the resolver, the enemy's
//! controller and the event bus for a single match. Each [`Encounter::step`]
//! runs, in order: player input, integration of every body, separation,
//! the NPC update (reading post-integration positions), attack windows and
//! hit resolution, and finally the round outcome.

use brawl_common::{CombatantId, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::{derive_action, ActionInputs, ActionState, HURT_DURATION};
use crate::attack::{strike_hitbox, ActiveAttack, AttackKind};
use crate::body::{Body, PhysicsConstants};
use crate::events::{CombatEvent, EventBus, HitEvent};
use crate::intent::Intent;
use crate::npc::{AiState, Difficulty, NpcController};
use crate::random::RandomSource;
use crate::rect::Rect;
use crate::resolver::{CombatResolver, Damageable};
use crate::space::{BodyId, SimulationSpace};
use crate::stats::CombatStats;

/// Arena and fighter setup for an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Arena width in pixels.
    pub arena_width: f32,
    /// Arena height in pixels.
    pub arena_height: f32,
    /// Ground plane distance from the arena bottom.
    pub ground_offset: f32,
    /// Fighter body width.
    pub fighter_width: f32,
    /// Fighter body height.
    pub fighter_height: f32,
    /// Distance of each spawn point from its wall.
    pub spawn_inset: f32,
    /// Player walking speed.
    pub player_speed: f32,
    /// Enemy walking speed.
    pub enemy_speed: f32,
    /// Enemy AI preset.
    pub difficulty: Difficulty,
    /// Physics tuning shared by both fighters.
    pub physics: PhysicsConstants,
    /// Event bus capacity.
    pub event_capacity: usize,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            arena_width: 960.0,
            arena_height: 540.0,
            ground_offset: 100.0,
            fighter_width: 80.0,
            fighter_height: 160.0,
            spawn_inset: 160.0,
            player_speed: 8.0,
            enemy_speed: crate::body::DEFAULT_MOVE_SPEED,
            difficulty: Difficulty::Normal,
            physics: PhysicsConstants::default(),
            event_capacity: 256,
        }
    }
}

impl EncounterConfig {
    /// Player spawn x.
    #[must_use]
    pub fn player_spawn_x(&self) -> f32 {
        self.spawn_inset
    }

    /// Enemy spawn x, mirrored from the right wall.
    #[must_use]
    pub fn enemy_spawn_x(&self) -> f32 {
        (self.arena_width - self.spawn_inset - self.fighter_width).max(0.0)
    }
}

/// Player controls for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Left held.
    pub move_left: bool,
    /// Right held.
    pub move_right: bool,
    /// Jump pressed.
    pub jump: bool,
    /// Block held.
    pub block: bool,
    /// Attack pressed, with its kind.
    pub attack: Option<AttackKind>,
}

/// Result of a round, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Enemy reached 0 health.
    Victory,
    /// Player reached 0 health.
    Defeat,
}

impl Outcome {
    /// Side that won.
    #[must_use]
    pub const fn winner(self) -> Side {
        match self {
            Self::Victory => Side::Player,
            Self::Defeat => Side::Enemy,
        }
    }

    /// Banner text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Victory => "VICTORY",
            Self::Defeat => "DEFEAT",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-fighter transient combat state.
#[derive(Debug, Clone)]
struct Corner {
    id: CombatantId,
    body: BodyId,
    attack: Option<ActiveAttack>,
    blocking: bool,
    hurt_timer: f32,
    hits_landed: u32,
}

impl Corner {
    fn new(id: CombatantId, body: BodyId) -> Self {
        Self {
            id,
            body,
            attack: None,
            blocking: false,
            hurt_timer: 0.0,
            hits_landed: 0,
        }
    }

    fn clear(&mut self) {
        self.attack = None;
        self.blocking = false;
        self.hurt_timer = 0.0;
    }
}

/// A single match between the player and one NPC.
#[derive(Debug)]
pub struct Encounter<R = fastrand::Rng> {
    config: EncounterConfig,
    space: SimulationSpace,
    resolver: CombatResolver,
    player_stats: CombatStats,
    player: Corner,
    enemy: Corner,
    npc: NpcController<R>,
    reported_state: AiState,
    bus: EventBus,
    outcome: Option<Outcome>,
    round: u32,
    ticks: u64,
    round_time: f32,
}

impl Encounter<fastrand::Rng> {
    /// Creates an encounter whose AI draws from a seeded generator.
    #[must_use]
    pub fn seeded(
        config: EncounterConfig,
        player_stats: CombatStats,
        enemy_stats: CombatStats,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            config,
            player_stats,
            enemy_stats,
            fastrand::Rng::with_seed(seed),
        )
    }
}

impl<R: RandomSource> Encounter<R> {
    /// Creates an encounter with both fighters standing at their spawns.
    pub fn with_rng(
        config: EncounterConfig,
        player_stats: CombatStats,
        enemy_stats: CombatStats,
        rng: R,
    ) -> Self {
        let mut space =
            SimulationSpace::new(config.arena_width, config.arena_height, config.ground_offset);
        let fighter = |x: f32, facing_right: bool| {
            Body::new(x, 0.0, config.fighter_width, config.fighter_height)
                .with_constants(config.physics)
                .with_facing(facing_right)
        };
        let player_body = space.add_body(fighter(config.player_spawn_x(), true));
        let enemy_body = space.add_body(fighter(config.enemy_spawn_x(), false));

        let mut npc = NpcController::new(
            CombatantId::ENEMY,
            enemy_body,
            enemy_stats,
            config.difficulty,
            rng,
        );
        npc.set_target(Some(player_body));

        let mut encounter = Self {
            bus: EventBus::new(config.event_capacity),
            config,
            space,
            resolver: CombatResolver::new(),
            player_stats,
            player: Corner::new(CombatantId::PLAYER, player_body),
            enemy: Corner::new(CombatantId::ENEMY, enemy_body),
            reported_state: npc.state(),
            npc,
            outcome: None,
            round: 1,
            ticks: 0,
            round_time: 0.0,
        };
        encounter.place_fighters();
        info!(
            difficulty = %encounter.config.difficulty,
            "encounter started"
        );
        encounter
    }

    /// Advances the match by one tick.
    ///
    /// Once the round is decided, input and AI are ignored and only the
    /// bodies keep integrating (so an airborne fighter still lands).
    pub fn step(&mut self, dt: f32, input: &PlayerInput) -> Option<Outcome> {
        if self.outcome.is_some() {
            self.space.update(dt);
            return self.outcome;
        }
        self.ticks += 1;
        self.round_time += dt;
        self.player.hurt_timer = (self.player.hurt_timer - dt).max(0.0);
        self.enemy.hurt_timer = (self.enemy.hurt_timer - dt).max(0.0);

        self.apply_player_input(input);
        self.space.update(dt);
        self.space.separate_all();

        let intent = self.npc.update(dt, &self.space);
        self.apply_npc_intent(&intent);
        self.report_npc_state();

        self.advance_attacks(dt);
        self.report_npc_state();

        self.check_outcome();
        self.outcome
    }

    /// Replays the round: full health, spawn positions, fresh timers.
    pub fn reset_round(&mut self) {
        self.player_stats.restore();
        self.npc.reset();
        self.player.clear();
        self.enemy.clear();
        self.place_fighters();
        self.reported_state = self.npc.state();
        self.outcome = None;
        self.round_time = 0.0;
        info!(round = self.round, "round reset");
    }

    /// Brings in a new enemy and starts the next round.
    pub fn next_round(&mut self, enemy_stats: CombatStats) {
        self.npc.respawn(enemy_stats);
        self.round += 1;
        self.reset_round();
    }

    fn place_fighters(&mut self) {
        let spawns = [
            (self.player.body, self.config.player_spawn_x(), true),
            (self.enemy.body, self.config.enemy_spawn_x(), false),
        ];
        for (id, x, facing_right) in spawns {
            if let Some(body) = self.space.body_mut(id) {
                body.reset_to(x);
                body.facing_right = facing_right;
            }
        }
    }

    fn apply_player_input(&mut self, input: &PlayerInput) {
        self.player.blocking = input.block;
        let speed = self.config.player_speed;
        if let Some(body) = self.space.body_mut(self.player.body) {
            match (input.move_left, input.move_right) {
                (true, false) => body.move_left(speed),
                (false, true) => body.move_right(speed),
                _ => body.halt(),
            }
            if input.jump {
                body.jump();
            }
        }

        if let Some(kind) = input.attack {
            if !input.block && self.player.attack.is_none() {
                if let Some(body) = self.space.body(self.player.body) {
                    let damage = kind.scaled_damage(self.player_stats.damage());
                    let attack = ActiveAttack::new(self.player.id, kind, strike_hitbox(body, damage));
                    self.open_attack(Side::Player, attack);
                }
            }
        }
    }

    fn apply_npc_intent(&mut self, intent: &Intent) {
        self.enemy.blocking = intent.block;
        let speed = self.config.enemy_speed;
        if let Some(body) = self.space.body_mut(self.enemy.body) {
            if let Some(direction) = intent.direction() {
                body.move_in(direction, speed);
            }
            if intent.jump {
                body.jump();
            }
        }

        if self.enemy.attack.is_some() {
            return;
        }
        let attack = if intent.special {
            self.space.body(self.enemy.body).map(|body| {
                let damage = AttackKind::Heavy.scaled_damage(self.npc.stats().damage());
                ActiveAttack::new(self.enemy.id, AttackKind::Heavy, strike_hitbox(body, damage))
            })
        } else if intent.attack {
            self.npc
                .attack_hitbox(&self.space)
                .map(|hitbox| ActiveAttack::new(self.enemy.id, AttackKind::Light, hitbox))
        } else {
            None
        };
        if let Some(attack) = attack {
            self.open_attack(Side::Enemy, attack);
        }
    }

    fn open_attack(&mut self, side: Side, attack: ActiveAttack) {
        debug!(attacker = %attack.owner, kind = ?attack.kind, damage = attack.hitbox.damage, "attack started");
        self.bus.publish(CombatEvent::AttackStarted {
            attacker: attack.owner,
            kind: attack.kind,
        });
        match side {
            Side::Player => self.player.attack = Some(attack),
            Side::Enemy => self.enemy.attack = Some(attack),
        }
    }

    fn advance_attacks(&mut self, dt: f32) {
        if let Some(mut attack) = self.player.attack.take() {
            let enemy_rect = self.space.body(self.enemy.body).map(Body::rect);
            if let Some(body) = self.space.body(self.player.body) {
                attack.follow(body);
            }
            if self.npc.stats().is_alive() {
                if let Some(hit) = land_hit(
                    &mut self.resolver,
                    &mut attack,
                    self.enemy.id,
                    enemy_rect,
                    &mut self.npc,
                ) {
                    self.enemy.hurt_timer = HURT_DURATION;
                    self.player.hits_landed += 1;
                    self.bus.publish(CombatEvent::Hit {
                        hit,
                        kind: attack.kind,
                    });
                }
            }
            attack.advance(dt);
            if attack.is_open() {
                self.player.attack = Some(attack);
            }
        }

        if let Some(mut attack) = self.enemy.attack.take() {
            let player_rect = self.space.body(self.player.body).map(Body::rect);
            if let Some(body) = self.space.body(self.enemy.body) {
                attack.follow(body);
            }
            if self.npc.stats().is_alive() && self.player_stats.is_alive() {
                if let Some(hit) = land_hit(
                    &mut self.resolver,
                    &mut attack,
                    self.player.id,
                    player_rect,
                    &mut self.player_stats,
                ) {
                    self.player.hurt_timer = HURT_DURATION;
                    self.enemy.hits_landed += 1;
                    self.bus.publish(CombatEvent::Hit {
                        hit,
                        kind: attack.kind,
                    });
                }
            }
            attack.advance(dt);
            if attack.is_open() {
                self.enemy.attack = Some(attack);
            }
        }
    }

    fn report_npc_state(&mut self) {
        let state = self.npc.state();
        if state != self.reported_state {
            self.bus.publish(CombatEvent::StateChanged {
                combatant: self.enemy.id,
                from: self.reported_state,
                to: state,
            });
            self.reported_state = state;
        }
    }

    fn check_outcome(&mut self) {
        let outcome = if !self.npc.stats().is_alive() {
            Outcome::Victory
        } else if !self.player_stats.is_alive() {
            Outcome::Defeat
        } else {
            return;
        };

        self.outcome = Some(outcome);
        self.player.attack = None;
        self.enemy.attack = None;
        for id in [self.player.body, self.enemy.body] {
            if let Some(body) = self.space.body_mut(id) {
                body.halt();
            }
        }
        info!(round = self.round, %outcome, ticks = self.ticks, "round ended");
        self.bus.publish(CombatEvent::RoundEnded {
            round: self.round,
            outcome,
        });
    }

    /// Animation state for one side.
    #[must_use]
    pub fn action_state(&self, side: Side) -> ActionState {
        let (corner, health) = match side {
            Side::Player => (&self.player, self.player_stats.health()),
            Side::Enemy => (&self.enemy, self.npc.stats().health()),
        };
        let body = self.space.body(corner.body);
        derive_action(&ActionInputs {
            health,
            attack: corner.attack.as_ref().map(|a| a.kind),
            blocking: corner.blocking,
            hurt_timer: corner.hurt_timer,
            on_ground: body.map_or(true, |b| b.on_ground),
            vx: body.map_or(0.0, |b| b.velocity.x),
        })
    }
}

impl<R> Encounter<R> {
    /// Configuration in effect.
    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// The simulation space.
    pub fn space(&self) -> &SimulationSpace {
        &self.space
    }

    /// Mutable access to the space, for debug tooling and tests.
    pub fn space_mut(&mut self) -> &mut SimulationSpace {
        &mut self.space
    }

    /// Body handle for a side.
    pub fn body_id(&self, side: Side) -> BodyId {
        match side {
            Side::Player => self.player.body,
            Side::Enemy => self.enemy.body,
        }
    }

    /// Body for a side.
    pub fn body(&self, side: Side) -> Option<&Body> {
        self.space.body(self.body_id(side))
    }

    /// Stats for a side.
    pub fn stats(&self, side: Side) -> &CombatStats {
        match side {
            Side::Player => &self.player_stats,
            Side::Enemy => self.npc.stats(),
        }
    }

    /// The enemy controller.
    pub fn npc(&self) -> &NpcController<R> {
        &self.npc
    }

    /// Mutable enemy controller, for debug tooling and tests.
    pub fn npc_mut(&mut self) -> &mut NpcController<R> {
        &mut self.npc
    }

    /// The resolver and its tallies.
    pub fn resolver(&self) -> &CombatResolver {
        &self.resolver
    }

    /// Open attack window for a side.
    pub fn active_attack(&self, side: Side) -> Option<&ActiveAttack> {
        match side {
            Side::Player => self.player.attack.as_ref(),
            Side::Enemy => self.enemy.attack.as_ref(),
        }
    }

    /// Hits a side has landed across all rounds.
    pub fn hits_landed(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player.hits_landed,
            Side::Enemy => self.enemy.hits_landed,
        }
    }

    /// Round result, once decided.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Current round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Ticks processed while a round was live.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds elapsed in the current round.
    pub fn round_time(&self) -> f32 {
        self.round_time
    }

    /// The event bus.
    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Takes every pending event.
    pub fn drain_events(&self) -> Vec<CombatEvent> {
        self.bus.drain()
    }
}

/// Scores `attack` against a defender once per activation.
fn land_hit<D: Damageable>(
    resolver: &mut CombatResolver,
    attack: &mut ActiveAttack,
    defender_id: CombatantId,
    defender_rect: Option<Rect>,
    defender: &mut D,
) -> Option<HitEvent> {
    let rect = defender_rect?;
    if !attack.hitbox.intersects_rect(&rect) || !attack.hitbox.record_strike(defender_id) {
        return None;
    }
    Some(resolver.resolve(attack.owner, attack.hitbox.damage, defender_id, defender))
}
