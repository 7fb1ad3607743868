//! Movement domain: kinematic bodies, the player controller and locomotion
//! plugin wiring.

mod body;
mod components;
mod controller;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use body::{ContactFlags, KinematicBody};
pub use components::{Facing, GameLayer, Player};
pub use controller::PlayerController;
pub use resources::{PlayerIntents, PlayerTuning};

use bevy::prelude::*;

use crate::core::SimulationSet;
use crate::movement::systems::{
    detect_contacts, integrate_bodies, read_input, sync_bodies_from_physics, update_player,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<PlayerIntents>()
            .add_systems(
                Update,
                (read_input, sync_bodies_from_physics, detect_contacts)
                    .chain()
                    .in_set(SimulationSet::Sense),
            )
            .add_systems(Update, update_player.in_set(SimulationSet::Player))
            .add_systems(Update, integrate_bodies.in_set(SimulationSet::Integrate));
    }
}
