//! Sprites module for layered actor rendering and animation signals.
//!
//! This module handles:
//! - Publishing per-actor animation states
//! - Body sprite facing, hit flash and death poses
//! - The player's weapon overlay

pub mod animation;
pub mod layers;
pub mod weapon;


use bevy::prelude::*;

pub use animation::*;
pub use layers::*;
pub use weapon::*;

use crate::core::SimulationSet;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationStateChanged>().add_systems(
            Update,
            (
                update_player_animation,
                update_enemy_animation,
                apply_player_visuals,
                apply_enemy_visuals,
                update_weapon_overlay,
            )
                .in_set(SimulationSet::Present),
        );
    }
}
