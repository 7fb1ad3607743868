//! Combat domain: archetype, tuning and randomness resources.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::collections::HashMap;

use crate::content::Vec2Def;

/// How an enemy reacts to a hit that does not kill it. One per archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum HitResponse {
    /// Pushed away from the attacker for `knockback_duration`.
    #[default]
    Knockback,
    /// Frozen in place for `stun_duration`.
    Stunned,
}

/// Timings of the scripted death sequence. Durations are seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeathTuning {
    pub total_duration: f32,
    /// Rotation to lying flat.
    pub fall_duration: f32,
    /// Settling drop once the rotation completes.
    pub drop_duration: f32,
    pub drop_distance: f32,
    /// Fraction of `total_duration` at which the fade-out begins.
    pub fade_start: f32,
    /// One-time velocity on death: x is recoil away from the player, y upward.
    pub impulse: Vec2Def,
}

impl Default for DeathTuning {
    fn default() -> Self {
        Self {
            total_duration: 1.0,
            fall_duration: 0.3,
            drop_duration: 0.2,
            drop_distance: 12.0,
            fade_start: 0.8,
            impulse: Vec2Def::new(200.0, 350.0),
        }
    }
}

/// Per-archetype enemy constants. Durations are seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyArchetype {
    pub id: String,
    pub move_speed: f32,
    pub accel: f32,
    pub drag: f32,
    pub gravity: f32,
    pub patrol_distance: f32,
    /// Fraction of `move_speed` used while patrolling.
    pub patrol_speed_factor: f32,
    pub chase: bool,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_duration: f32,
    pub attack_damage: u32,
    pub hit_response: HitResponse,
    pub knockback_speed: f32,
    pub knockback_duration: f32,
    pub stun_duration: f32,
    /// Chance per tick that Idle resumes patrolling.
    pub idle_resume_chance: f32,
    pub max_health: u32,
    pub hit_flash: f32,
    /// Hop speed for a grounded chaser blocked by a wall.
    pub jump_velocity: f32,
    pub body_size: Vec2Def,
    pub death: DeathTuning,
}

impl Default for EnemyArchetype {
    fn default() -> Self {
        Self {
            id: "bully".to_string(),
            move_speed: 150.0,
            accel: 800.0,
            drag: 800.0,
            gravity: 2000.0,
            patrol_distance: 200.0,
            patrol_speed_factor: 0.6,
            chase: false,
            detection_range: 300.0,
            attack_range: 50.0,
            attack_cooldown: 1.5,
            attack_duration: 0.4,
            attack_damage: 1,
            hit_response: HitResponse::Knockback,
            knockback_speed: 300.0,
            knockback_duration: 0.3,
            stun_duration: 0.8,
            idle_resume_chance: 0.01,
            max_health: 3,
            hit_flash: 0.2,
            jump_velocity: 500.0,
            body_size: Vec2Def::new(24.0, 32.0),
            death: DeathTuning::default(),
        }
    }
}

impl EnemyArchetype {
    pub fn patrol_speed(&self) -> f32 {
        self.move_speed * self.patrol_speed_factor
    }
}

/// Loaded archetypes, keyed by id.
#[derive(Resource, Debug, Clone)]
pub struct EnemyArchetypes {
    by_id: HashMap<String, EnemyArchetype>,
}

impl EnemyArchetypes {
    pub fn from_list(archetypes: Vec<EnemyArchetype>) -> Self {
        Self {
            by_id: archetypes.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&EnemyArchetype> {
        self.by_id.get(id)
    }
}

impl Default for EnemyArchetypes {
    fn default() -> Self {
        Self::from_list(vec![EnemyArchetype::default()])
    }
}

/// Scene-level combat rules. Durations are seconds.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Minimum gap between two body-contact hits from the same enemy.
    pub collision_cooldown: f32,
    pub contact_damage: u32,
    pub player_attack_range: f32,
    /// Minimum gap between two player-attack hits on the same enemy.
    pub player_attack_cooldown: f32,
    pub player_attack_damage: u32,
    /// How close the player must be to an enemy attack's origin to be hurt.
    pub enemy_hit_proximity: f32,
    /// Delay between player death and the level restarting.
    pub restart_delay: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            collision_cooldown: 1.0,
            contact_damage: 1,
            player_attack_range: 80.0,
            player_attack_cooldown: 0.4,
            player_attack_damage: 1,
            enemy_hit_proximity: 80.0,
            restart_delay: 1.5,
        }
    }
}

/// Seeded randomness for AI rolls.
#[derive(Resource, Debug)]
pub struct AiRng(pub ChaCha8Rng);

impl AiRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
