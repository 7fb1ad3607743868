//! Debug domain: hotkeys and state logging.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{
    CombatOutbox, DamageDealtEvent, DeathEvent, Enemy, EnemyController, Health,
};
use crate::debug::state::DebugState;
use crate::movement::{KinematicBody, Player, PlayerController};
use crate::sprites::AnimationStateChanged;

/// F1: state logging, F2: god mode.
pub(crate) fn handle_debug_toggles(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.log_state = !debug_state.log_state;
        debug_state.log_timer = 0.0;
        info!("Debug: state logging {}", on_off(debug_state.log_state));
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.god_mode = !debug_state.god_mode;
        info!("Debug: god mode {}", on_off(debug_state.god_mode));
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

/// Keep the player's god mode in step with the toggle, including after a
/// level restart spawns a fresh controller.
pub(crate) fn sync_god_mode(
    debug_state: Res<DebugState>,
    mut query: Query<&mut PlayerController, With<Player>>,
) {
    for mut controller in &mut query {
        if controller.god_mode != debug_state.god_mode {
            controller.god_mode = debug_state.god_mode;
        }
    }
}

/// F3: kill every live enemy through the normal damage path.
pub(crate) fn kill_all_enemies(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&mut EnemyController, &mut KinematicBody, &mut Health), With<Enemy>>,
    mut damage: MessageWriter<DamageDealtEvent>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }
    let now = time.elapsed_secs_f64();
    let mut outbox = CombatOutbox::default();
    let mut killed = 0;

    for (mut controller, mut body, mut health) in &mut query {
        if controller.is_dead() {
            continue;
        }
        let amount = health.current;
        controller.take_damage(amount, None, now, &mut health, &mut body, &mut outbox);
        killed += 1;
    }

    outbox.drain_outcomes(&mut damage, &mut deaths);
    info!("Debug: killed {} enemies", killed);
}

pub(crate) fn log_state(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    player_query: Query<(&PlayerController, &KinematicBody, &Health), With<Player>>,
    enemy_query: Query<(&EnemyController, &KinematicBody, &Health), With<Enemy>>,
    mut animation_events: MessageReader<AnimationStateChanged>,
) {
    let log_changes = debug_state.log_state;
    for event in animation_events.read() {
        if log_changes {
            info!("{:?}: {:?} -> {:?}", event.entity, event.from, event.to);
        }
    }

    if !debug_state.tick_log(time.delta_secs()) {
        return;
    }

    for (controller, body, health) in &player_query {
        info!(
            "Player {:?} pos=({:.0}, {:.0}) vel=({:.0}, {:.0}) hp={}/{} jumps={} blocked=({}, {})",
            controller.state(),
            body.position.x,
            body.position.y,
            body.velocity().x,
            body.velocity().y,
            health.current,
            health.max,
            controller.jumps_remaining(),
            body.is_blocked_left(),
            body.is_blocked_right()
        );
    }
    for (controller, body, health) in &enemy_query {
        if let Some(death) = controller.death_sequence() {
            info!(
                "Enemy {:?} dying toward {:?}, collision cut: {}",
                controller.id(),
                death.fall_direction(),
                death.collision_cut()
            );
            continue;
        }
        info!(
            "Enemy {:?} {:?} pos=({:.0}, {:.0}) origin={:.0} hp={}/{}",
            controller.id(),
            controller.state(),
            body.position.x,
            body.position.y,
            controller.patrol_origin_x(),
            health.current,
            health.max
        );
    }
}
