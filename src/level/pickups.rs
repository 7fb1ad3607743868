//! Level domain: collectibles, the kill plane and level completion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::LevelDef;
use crate::core::GameState;
use crate::level::{Collectible, LevelProgress};
use crate::movement::{KinematicBody, Player};

/// Collectibles the player started touching, each reported once.
///
/// `contacts` are collider pairs in either order. Pairs that do not involve
/// the player, or whose other side is not a collectible, are skipped.
pub fn touched_collectibles(
    contacts: impl IntoIterator<Item = (Entity, Entity)>,
    player: Entity,
    is_collectible: impl Fn(Entity) -> bool,
) -> Vec<Entity> {
    let mut touched = Vec::new();
    for (a, b) in contacts {
        let other = if a == player {
            b
        } else if b == player {
            a
        } else {
            continue;
        };
        if is_collectible(other) && !touched.contains(&other) {
            touched.push(other);
        }
    }
    touched
}

pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut progress: ResMut<LevelProgress>,
    player_query: Query<Entity, With<Player>>,
    collectibles: Query<&Collectible>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let Ok(player) = player_query.single() else {
        for _ in collision_events.read() {}
        return;
    };

    let contacts = collision_events
        .read()
        .map(|event| (event.collider1, event.collider2));
    let touched = touched_collectibles(contacts, player, |entity| {
        collectibles.contains(entity)
    });

    for entity in touched {
        let Ok(collectible) = collectibles.get(entity) else {
            continue;
        };
        commands.entity(entity).despawn();
        progress.collect(collectible.value);
        debug!(
            "Collected {}/{} (score {})",
            progress.collected, progress.total, progress.score
        );

        if progress.is_complete() {
            info!("All collectibles found, score {}", progress.score);
            game_state.set(GameState::LevelComplete);
        }
    }
}

/// Falling out of the level restarts it immediately.
pub(crate) fn check_kill_plane(
    level: Res<LevelDef>,
    player_query: Query<&KinematicBody, With<Player>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    if player.position.y < level.kill_plane_y {
        info!("Player fell out of the level");
        game_state.set(GameState::Restarting);
    }
}

pub(crate) fn announce_level_complete(progress: Res<LevelProgress>, level: Res<LevelDef>) {
    info!(
        "Level '{}' complete with score {}. Press Enter to play again.",
        level.name, progress.score
    );
}

pub(crate) fn replay_on_enter(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        game_state.set(GameState::Run);
    }
}
