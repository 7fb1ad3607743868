//! Core domain: game state definitions for the level flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    #[default]
    Boot,
    /// The level is live and the simulation ticks.
    Run,
    /// Transient: the level was torn down and is about to respawn.
    Restarting,
    LevelComplete,
}

/// Per-tick ordering of the simulation. Only runs in [`GameState::Run`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Input intents, physics read-back and contact flags.
    Sense,
    Player,
    Enemies,
    /// Cross-actor combat rules on this tick's positions.
    Resolve,
    /// Velocities handed to the physics step.
    Integrate,
    Cleanup,
    /// Animation signals and sprite updates.
    Present,
}
