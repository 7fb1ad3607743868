//! Dev tools for fast iteration and testing.
//!
//! Features:
//! - F1: toggle periodic player/enemy state logging
//! - F2: toggle player god mode
//! - F3: kill every live enemy

mod state;
mod systems;


pub use state::DebugState;

use bevy::prelude::*;

use crate::core::{GameState, SimulationSet};
use crate::debug::systems::{handle_debug_toggles, kill_all_enemies, log_state, sync_god_mode};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, handle_debug_toggles)
            .add_systems(
                Update,
                (sync_god_mode, kill_all_enemies)
                    .chain()
                    .before(SimulationSet::Resolve)
                    .after(SimulationSet::Enemies)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(Update, log_state.after(SimulationSet::Present));
    }
}
