//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. Tuning structs deserialize with
//! `#[serde(default)]`, so a file only needs the fields it overrides.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{CombatTuning, EnemyArchetype};
use crate::movement::PlayerTuning;

/// Serializable Vec2 for RON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl Vec2Def {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// Schema version both data files must declare.
pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Archetypes (archetypes.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ArchetypeFile {
    pub schema_version: u32,
    #[serde(default)]
    pub player: PlayerTuning,
    #[serde(default)]
    pub enemies: Vec<EnemyArchetype>,
    #[serde(default)]
    pub combat: CombatTuning,
}

impl Default for ArchetypeFile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            player: PlayerTuning::default(),
            enemies: vec![EnemyArchetype::default()],
            combat: CombatTuning::default(),
        }
    }
}

// ============================================================================
// Levels (level0.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum GeometryKind {
    /// Walkable from above.
    #[default]
    Ground,
    /// Blocks sideways movement.
    Wall,
}

/// An axis-aligned solid box. `position` is the box centre.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    pub position: Vec2Def,
    pub size: Vec2Def,
    #[serde(default)]
    pub kind: GeometryKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawnDef {
    pub archetype: String,
    pub position: Vec2Def,
}

#[derive(Resource, Debug, Clone, Deserialize)]
pub struct LevelDef {
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    /// World size; the origin is the bottom-left corner.
    pub bounds: Vec2Def,
    /// Falling below this y restarts the level.
    pub kill_plane_y: f32,
    pub player_spawn: Vec2Def,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
    #[serde(default)]
    pub collectibles: Vec<Vec2Def>,
    #[serde(default = "default_collectible_value")]
    pub collectible_value: u32,
}

fn default_collectible_value() -> u32 {
    10
}

impl LevelDef {
    /// A single floor with one bully, used when level content fails to load.
    pub fn fallback() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id: "fallback".to_string(),
            name: "Fallback Floor".to_string(),
            bounds: Vec2Def::new(1600.0, 900.0),
            kill_plane_y: -200.0,
            player_spawn: Vec2Def::new(100.0, 120.0),
            platforms: vec![PlatformDef {
                position: Vec2Def::new(800.0, 32.0),
                size: Vec2Def::new(1600.0, 64.0),
                kind: GeometryKind::Ground,
            }],
            enemies: vec![EnemySpawnDef {
                archetype: "bully".to_string(),
                position: Vec2Def::new(800.0, 96.0),
            }],
            collectibles: vec![Vec2Def::new(1400.0, 120.0)],
            collectible_value: default_collectible_value(),
        }
    }
}
