//! Engine configuration.
//!
//! Arena, fighter, AI, timing and match settings for a headless run.
//! Configuration can be loaded from and saved to a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use brawl_combat::{CombatStats, Difficulty, EncounterConfig, PhysicsConstants};
use brawl_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "brawl.toml";

/// Environment variable that overrides the configuration path.
pub const CONFIG_ENV: &str = "BRAWL_CONFIG";

/// Settings for a headless match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Arena ===
    /// Arena width in pixels
    pub arena_width: f32,
    /// Arena height in pixels
    pub arena_height: f32,
    /// Ground plane distance from the arena bottom
    pub ground_offset: f32,

    // === Fighters ===
    /// Fighter body width
    pub fighter_width: f32,
    /// Fighter body height
    pub fighter_height: f32,
    /// Spawn distance from each wall
    pub spawn_inset: f32,
    /// Player walking speed
    pub player_speed: f32,
    /// Enemy walking speed
    pub enemy_speed: f32,
    /// Player damage stat
    pub player_damage: i32,
    /// Player resistance stat
    pub player_resistance: i32,
    /// First enemy's damage stat
    pub enemy_damage: i32,
    /// First enemy's resistance stat
    pub enemy_resistance: i32,
    /// Stat points each new enemy gains over the previous one
    pub enemy_growth: i32,

    // === AI ===
    /// Difficulty label (EASY, NORMAL, HARD)
    pub difficulty: String,

    // === Timing ===
    /// Simulated frames per second
    pub target_fps: u32,
    /// Step the simulation at a fixed 60 Hz regardless of frame rate
    pub fixed_timestep: bool,

    // === Match ===
    /// RNG seed (None = random)
    pub seed: Option<u64>,
    /// Rounds to win the match
    pub max_rounds: u32,
    /// Seconds before a round is decided on health
    pub round_time_limit: f32,
    /// Combat event bus capacity
    pub event_capacity: usize,
    /// Log every combat event at debug level
    pub log_events: bool,

    // === Physics ===
    /// Physics tuning
    pub physics: PhysicsConstants,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: 960.0,
            arena_height: 540.0,
            ground_offset: 100.0,

            // Fighters
            fighter_width: 80.0,
            fighter_height: 160.0,
            spawn_inset: 160.0,
            player_speed: 8.0,
            enemy_speed: 1.0,
            player_damage: 8,
            player_resistance: 6,
            enemy_damage: 6,
            enemy_resistance: 5,
            enemy_growth: 1,

            // AI
            difficulty: Difficulty::Normal.label().to_string(),

            // Timing
            target_fps: 60,
            fixed_timestep: false,

            // Match
            seed: None,
            max_rounds: 3,
            round_time_limit: 99.0,
            event_capacity: 256,
            log_events: false,

            physics: PhysicsConstants::default(),
        }
    }
}

impl EngineConfig {
    /// Loads from [`EngineConfig::config_path`], falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Loads from `path`. A missing or unreadable file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Loads from `path`, returning the read or parse failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Writes pretty TOML to `path`, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents).map_err(write_err)?;

        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Configuration file path: `$BRAWL_CONFIG`, else `brawl.toml` in the
    /// working directory.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Clamps every value into a playable range.
    pub fn validate(&mut self) {
        self.replace_non_finite();

        // Arena
        self.arena_width = self.arena_width.clamp(320.0, 7680.0);
        self.arena_height = self.arena_height.clamp(240.0, 4320.0);
        self.ground_offset = self.ground_offset.clamp(0.0, self.arena_height / 2.0);

        // Fighters
        self.fighter_width = self.fighter_width.clamp(1.0, self.arena_width / 4.0);
        self.fighter_height = self
            .fighter_height
            .clamp(1.0, self.arena_height - self.ground_offset);
        self.spawn_inset = self
            .spawn_inset
            .clamp(0.0, (self.arena_width / 2.0 - self.fighter_width).max(0.0));
        self.player_speed = self.player_speed.clamp(0.0, 50.0);
        self.enemy_speed = self.enemy_speed.clamp(0.0, 50.0);
        self.enemy_growth = self.enemy_growth.clamp(0, 10);

        // Timing
        self.target_fps = self.target_fps.clamp(10, 240);

        // Match
        self.max_rounds = self.max_rounds.clamp(1, 99);
        self.round_time_limit = self.round_time_limit.clamp(5.0, 999.0);
        self.event_capacity = self.event_capacity.clamp(16, 65_536);

        // Physics
        self.physics.friction = self.physics.friction.clamp(0.0, 1.0);
        self.physics.max_speed = self.physics.max_speed.max(0.0);
    }

    /// TOML accepts `nan` and `inf`; those fall back to the defaults.
    fn replace_non_finite(&mut self) {
        let defaults = Self::default();
        let fields = [
            (&mut self.arena_width, defaults.arena_width),
            (&mut self.arena_height, defaults.arena_height),
            (&mut self.ground_offset, defaults.ground_offset),
            (&mut self.fighter_width, defaults.fighter_width),
            (&mut self.fighter_height, defaults.fighter_height),
            (&mut self.spawn_inset, defaults.spawn_inset),
            (&mut self.player_speed, defaults.player_speed),
            (&mut self.enemy_speed, defaults.enemy_speed),
            (&mut self.round_time_limit, defaults.round_time_limit),
            (&mut self.physics.gravity, defaults.physics.gravity),
            (&mut self.physics.friction, defaults.physics.friction),
            (&mut self.physics.max_speed, defaults.physics.max_speed),
            (&mut self.physics.jump_impulse, defaults.physics.jump_impulse),
        ];
        for (value, fallback) in fields {
            if !value.is_finite() {
                warn!(value = %value, fallback, "non-finite config value, using default");
                *value = fallback;
            }
        }
    }

    /// Parsed difficulty. Unknown labels fall back to NORMAL.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_label(&self.difficulty)
    }

    /// Player stat record.
    #[must_use]
    pub fn player_stats(&self) -> CombatStats {
        CombatStats::new(self.player_damage, self.player_resistance)
    }

    /// Stat record for the enemy of `round` (1-based).
    #[must_use]
    pub fn enemy_stats(&self, round: u32) -> CombatStats {
        let growth = self
            .enemy_growth
            .saturating_mul(round.saturating_sub(1) as i32);
        CombatStats::new(
            self.enemy_damage.saturating_add(growth),
            self.enemy_resistance.saturating_add(growth),
        )
    }

    /// Seconds per simulated frame.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Encounter setup derived from this configuration.
    #[must_use]
    pub fn encounter_config(&self) -> EncounterConfig {
        EncounterConfig {
            arena_width: self.arena_width,
            arena_height: self.arena_height,
            ground_offset: self.ground_offset,
            fighter_width: self.fighter_width,
            fighter_height: self.fighter_height,
            spawn_inset: self.spawn_inset,
            player_speed: self.player_speed,
            enemy_speed: self.enemy_speed,
            difficulty: self.difficulty(),
            physics: self.physics,
            event_capacity: self.event_capacity,
        }
    }
}
