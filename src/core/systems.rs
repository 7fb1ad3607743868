//! Core domain: level flow systems and setup.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{ActorId, CombatTuning, DeathEvent};
use crate::content::LevelDef;
use crate::core::resources::{PendingRestart, RunConfig, SEED_ENV};
use crate::core::state::GameState;
use crate::movement::Player;

/// How quickly the camera closes on the player, per second.
const CAMERA_FOLLOW_RATE: f32 = 8.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn apply_seed_override(mut config: ResMut<RunConfig>) {
    let raw = std::env::var(SEED_ENV).ok();
    match RunConfig::seed_override(raw.as_deref()) {
        Ok(Some(seed)) => *config = RunConfig::with_seed(seed),
        Ok(None) => {}
        Err(e) => warn!("Ignoring {}: {}", SEED_ENV, e),
    }
}

pub(crate) fn start_run(config: Res<RunConfig>, mut game_state: ResMut<NextState<GameState>>) {
    info!("Starting run with seed: {}", config.seed);
    game_state.set(GameState::Run);
}

pub(crate) fn clear_pending_restart(mut pending: ResMut<PendingRestart>) {
    pending.clear();
}

/// Player death restarts the level after the configured delay.
pub(crate) fn schedule_restart_on_player_death(
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut deaths: MessageReader<DeathEvent>,
    mut pending: ResMut<PendingRestart>,
) {
    for event in deaths.read() {
        if event.actor != ActorId::Player || pending.is_scheduled() {
            continue;
        }
        pending.schedule(time.elapsed_secs_f64(), tuning.restart_delay);
        info!("Player died, restarting in {:.1}s", tuning.restart_delay);
    }
}

pub(crate) fn tick_pending_restart(
    time: Res<Time>,
    pending: Res<PendingRestart>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if pending.is_due(time.elapsed_secs_f64()) {
        game_state.set(GameState::Restarting);
    }
}

/// The level was torn down on leaving Run; bring it straight back.
pub(crate) fn finish_restart(mut game_state: ResMut<NextState<GameState>>) {
    info!("Restarting level");
    game_state.set(GameState::Run);
}

pub(crate) fn camera_follow_player(
    time: Res<Time>,
    level: Option<Res<LevelDef>>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &Projection), With<Camera2d>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok((mut camera, projection)) = camera_query.single_mut() else {
        return;
    };

    let mut target = player.translation.truncate();
    if let (Some(level), Projection::Orthographic(ortho)) = (level, projection) {
        let half_view = ortho.area.size() * 0.5;
        let bounds: Vec2 = level.bounds.into();
        target = target.clamp(half_view, (bounds - half_view).max(half_view));
    }

    let blend = (CAMERA_FOLLOW_RATE * time.delta_secs()).min(1.0);
    let current = camera.translation.truncate();
    let next = current.lerp(target, blend);
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
