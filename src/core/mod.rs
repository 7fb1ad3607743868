//! Core domain: game state, run configuration, tick ordering and level flow.

mod resources;
mod state;
mod systems;
pub mod timing;


pub use resources::{PendingRestart, RunConfig};
pub use state::{GameState, SimulationSet};

use bevy::prelude::*;

use crate::core::systems::{
    apply_seed_override, camera_follow_player, clear_pending_restart, finish_restart,
    schedule_restart_on_player_death, setup_camera, start_run, tick_pending_restart,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<PendingRestart>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Sense,
                    SimulationSet::Player,
                    SimulationSet::Enemies,
                    SimulationSet::Resolve,
                    SimulationSet::Integrate,
                    SimulationSet::Cleanup,
                    SimulationSet::Present,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(PreStartup, apply_seed_override)
            .add_systems(Startup, (setup_camera, start_run))
            .add_systems(OnEnter(GameState::Run), clear_pending_restart)
            .add_systems(OnEnter(GameState::Restarting), finish_restart)
            .add_systems(
                Update,
                (schedule_restart_on_player_death, tick_pending_restart)
                    .chain()
                    .after(SimulationSet::Cleanup)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(Update, camera_follow_player.after(SimulationSet::Present));
    }
}
