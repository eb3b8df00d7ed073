//! Game configuration resource.
//!
//! Every gameplay tuning constant lives here, grouped per archetype, with
//! defaults matching the shipped game. Values can be overridden from an INI
//! file; missing keys keep their defaults. Durations are in seconds.
//!
//! # Configuration File Format
//!
//! ```ini
//! [player]
//! speed = 400
//! hp = 40
//! damage = 1
//!
//! [dodge]
//! speed_bonus = 1500
//! cooldown = 1.0
//! duration = 0.8
//! grace = 0.3
//!
//! [attack]
//! grace = 0.35
//! hover_distance = 34
//! swing_angle_scale = 2.0
//! downswing_divisor = 36
//! damage_frames = 2,7
//!
//! [captain]
//! hp = 7
//! damage = 1
//! range = 350
//! idle_after_attack = 1.6
//! projectile_speed = 400
//!
//! [projectile]
//! lifetime = 10.0
//! muzzle_offset_y = -50
//!
//! [combat]
//! damage_invulnerability = 0.1
//!
//! [arena]
//! width = 1280
//! height = 720
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use smallvec::{SmallVec, smallvec};
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Dodge roll tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct DodgeTuning {
    /// Extra speed added along the roll direction at roll start.
    pub speed_bonus: f32,
    /// Time from roll start until the next roll may start.
    pub cooldown: f32,
    /// Length of the roll (and of the boost decay).
    pub duration: f32,
    /// Time from roll start until directional input is accepted again.
    pub grace: f32,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            speed_bonus: 1500.0,
            cooldown: 1.0,
            duration: 0.8,
            grace: 0.3,
        }
    }
}

impl DodgeTuning {
    /// `0 <= grace <= duration <= cooldown`: each roll's timers expire
    /// before the next roll can start.
    pub fn is_ordered(&self) -> bool {
        0.0 <= self.grace && self.grace <= self.duration && self.duration <= self.cooldown
    }
}

/// Weapon swing tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackTuning {
    /// Time from swing start until movement and dodging are accepted again.
    pub grace: f32,
    /// Distance between the owner and the weapon during a swing.
    pub hover_distance: f32,
    pub swing_angle_scale: f32,
    pub downswing_divisor: f32,
    /// Swing frames on which the weapon deals damage.
    pub damage_frames: SmallVec<[usize; 4]>,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            grace: 0.35,
            hover_distance: 34.0,
            swing_angle_scale: 2.0,
            downswing_divisor: 36.0,
            damage_frames: smallvec![2, 7],
        }
    }
}

impl AttackTuning {
    pub fn is_damage_frame(&self, frame: usize) -> bool {
        self.damage_frames.contains(&frame)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    pub speed: f32,
    pub hp: i32,
    pub damage: i32,
    pub dodge: DodgeTuning,
    pub attack: AttackTuning,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 400.0,
            hp: 40,
            damage: 1,
            dodge: DodgeTuning::default(),
            attack: AttackTuning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileTuning {
    /// Seconds before an unspent projectile is destroyed.
    pub lifetime: f32,
    /// Vertical offset from the shooter's pivot to the muzzle.
    pub muzzle_offset_y: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            lifetime: 10.0,
            muzzle_offset_y: -50.0,
        }
    }
}

/// Ranged enemy tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptainTuning {
    pub hp: i32,
    pub damage: i32,
    /// Distance at which the captain starts shooting at the player.
    pub range: f32,
    /// Pause after each shot.
    pub idle_after_attack: f32,
    pub projectile_speed: f32,
    pub projectile: ProjectileTuning,
}

impl Default for CaptainTuning {
    fn default() -> Self {
        Self {
            hp: 7,
            damage: 1,
            range: 350.0,
            idle_after_attack: 1.6,
            projectile_speed: 400.0,
            projectile: ProjectileTuning::default(),
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub captain: CaptainTuning,
    /// Invulnerability window after taking a hit.
    pub damage_invulnerability: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_i32(config: &Ini, section: &str, key: &str, target: &mut i32) {
    if let Some(value) = config.getint(section, key).ok().flatten() {
        *target = value as i32;
    }
}

/// Parse a comma separated frame list such as `2,7`.
fn parse_frame_list(raw: &str) -> Result<SmallVec<[usize; 4]>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|e| format!("Invalid damage frame '{}': {}", s, e))
        })
        .collect()
}

impl GameConfig {
    /// Create a new configuration with the shipped tuning values.
    pub fn new() -> Self {
        Self {
            player: PlayerTuning::default(),
            captain: CaptainTuning::default(),
            damage_invulnerability: 0.1,
            arena_width: 1280.0,
            arena_height: 720.0,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config)?;
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), String> {
        // [player] section
        read_f32(config, "player", "speed", &mut self.player.speed);
        read_i32(config, "player", "hp", &mut self.player.hp);
        read_i32(config, "player", "damage", &mut self.player.damage);

        // [dodge] section
        let dodge = &mut self.player.dodge;
        read_f32(config, "dodge", "speed_bonus", &mut dodge.speed_bonus);
        read_f32(config, "dodge", "cooldown", &mut dodge.cooldown);
        read_f32(config, "dodge", "duration", &mut dodge.duration);
        read_f32(config, "dodge", "grace", &mut dodge.grace);
        if !dodge.is_ordered() {
            warn!(
                "[dodge] expects 0 <= grace <= duration <= cooldown, got grace={} duration={} cooldown={}",
                dodge.grace, dodge.duration, dodge.cooldown
            );
        }

        // [attack] section
        let attack = &mut self.player.attack;
        read_f32(config, "attack", "grace", &mut attack.grace);
        read_f32(config, "attack", "hover_distance", &mut attack.hover_distance);
        read_f32(config, "attack", "swing_angle_scale", &mut attack.swing_angle_scale);
        read_f32(config, "attack", "downswing_divisor", &mut attack.downswing_divisor);
        if let Some(frames) = config.get("attack", "damage_frames") {
            attack.damage_frames = parse_frame_list(&frames)?;
        }

        // [captain] section
        let captain = &mut self.captain;
        read_i32(config, "captain", "hp", &mut captain.hp);
        read_i32(config, "captain", "damage", &mut captain.damage);
        read_f32(config, "captain", "range", &mut captain.range);
        read_f32(config, "captain", "idle_after_attack", &mut captain.idle_after_attack);
        read_f32(config, "captain", "projectile_speed", &mut captain.projectile_speed);

        // [projectile] section
        let projectile = &mut self.captain.projectile;
        read_f32(config, "projectile", "lifetime", &mut projectile.lifetime);
        read_f32(config, "projectile", "muzzle_offset_y", &mut projectile.muzzle_offset_y);

        // [combat] section
        read_f32(config, "combat", "damage_invulnerability", &mut self.damage_invulnerability);

        // [arena] section
        read_f32(config, "arena", "width", &mut self.arena_width);
        read_f32(config, "arena", "height", &mut self.arena_height);

        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("player", "speed", self.player.speed.to_string());
        set("player", "hp", self.player.hp.to_string());
        set("player", "damage", self.player.damage.to_string());

        let dodge = &self.player.dodge;
        set("dodge", "speed_bonus", dodge.speed_bonus.to_string());
        set("dodge", "cooldown", dodge.cooldown.to_string());
        set("dodge", "duration", dodge.duration.to_string());
        set("dodge", "grace", dodge.grace.to_string());

        let attack = &self.player.attack;
        set("attack", "grace", attack.grace.to_string());
        set("attack", "hover_distance", attack.hover_distance.to_string());
        set("attack", "swing_angle_scale", attack.swing_angle_scale.to_string());
        set("attack", "downswing_divisor", attack.downswing_divisor.to_string());
        let frames: Vec<String> = attack.damage_frames.iter().map(|f| f.to_string()).collect();
        set("attack", "damage_frames", frames.join(","));

        let captain = &self.captain;
        set("captain", "hp", captain.hp.to_string());
        set("captain", "damage", captain.damage.to_string());
        set("captain", "range", captain.range.to_string());
        set("captain", "idle_after_attack", captain.idle_after_attack.to_string());
        set("captain", "projectile_speed", captain.projectile_speed.to_string());

        set("projectile", "lifetime", captain.projectile.lifetime.to_string());
        set("projectile", "muzzle_offset_y", captain.projectile.muzzle_offset_y.to_string());

        set("combat", "damage_invulnerability", self.damage_invulnerability.to_string());

        set("arena", "width", self.arena_width.to_string());
        set("arena", "height", self.arena_height.to_string());

        config
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
