//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::content::Vec2Def;

/// Player archetype constants. Durations are seconds.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub ground_accel: f32,
    pub air_accel: f32,
    pub ground_drag: f32,
    pub air_drag: f32,
    /// Upward launch speed (world is y-up).
    pub jump_velocity: f32,
    pub gravity: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Total jumps per takeoff (2 = double jump).
    pub max_jumps: u8,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub attack_duration: f32,
    pub invincibility_time: f32,
    /// Velocity applied when hurt: x away from the source, y upward.
    pub knockback: Vec2Def,
    pub knockback_time: f32,
    pub max_health: u32,
    pub body_size: Vec2Def,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 300.0,
            ground_accel: 2000.0,
            air_accel: 800.0,
            ground_drag: 2000.0,
            air_drag: 800.0,
            jump_velocity: 1000.0,
            gravity: 2000.0,
            coyote_time: 0.15,
            jump_buffer_time: 0.1,
            max_jumps: 2,
            dash_speed: 800.0,
            dash_duration: 0.15,
            dash_cooldown: 0.5,
            attack_duration: 0.3,
            invincibility_time: 1.0,
            knockback: Vec2Def::new(350.0, 250.0),
            knockback_time: 0.25,
            max_health: 5,
            body_size: Vec2Def::new(24.0, 48.0),
        }
    }
}

/// Debounced intents for one tick. The `*_just_pressed` flags are true only
/// on the tick the button went down.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerIntents {
    pub left: bool,
    pub right: bool,
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
    pub attack_just_pressed: bool,
}

impl PlayerIntents {
    /// -1, 0 or +1. Both directions held cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
