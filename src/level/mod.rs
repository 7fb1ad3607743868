//! Level domain: level spawn and cleanup, collectibles and score.

mod pickups;
mod spawn;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{GameState, SimulationSet};
use crate::level::pickups::{
    announce_level_complete, check_kill_plane, collect_pickups, replay_on_enter,
};
use crate::level::spawn::{despawn_level, spawn_level};

/// Marker for everything that belongs to the current level attempt.
#[derive(Component, Debug)]
pub struct LevelEntity;

#[derive(Component, Debug)]
pub struct Collectible {
    pub value: u32,
}

/// Score and collectible count for the current attempt.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    pub score: u32,
    pub collected: u32,
    pub total: u32,
}

impl LevelProgress {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            ..default()
        }
    }

    pub fn collect(&mut self, value: u32) {
        self.collected = (self.collected + 1).min(self.total);
        self.score += value;
    }

    /// A level without collectibles is never complete this way.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.collected >= self.total
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelProgress>()
            .add_systems(OnEnter(GameState::Run), spawn_level)
            .add_systems(OnExit(GameState::Run), despawn_level)
            .add_systems(OnEnter(GameState::LevelComplete), announce_level_complete)
            .add_systems(
                Update,
                (collect_pickups, check_kill_plane)
                    .chain()
                    .in_set(SimulationSet::Cleanup),
            )
            .add_systems(
                Update,
                replay_on_enter.run_if(in_state(GameState::LevelComplete)),
            );
    }
}
