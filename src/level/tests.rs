//! Level domain: tests for score tracking and pickups.

use bevy::prelude::World;

use super::LevelProgress;
use super::pickups::touched_collectibles;

#[test]
fn test_progress_completes_after_last_pickup() {
    let mut progress = LevelProgress::new(2);
    assert!(!progress.is_complete());

    progress.collect(10);
    assert!(!progress.is_complete());

    progress.collect(10);
    assert!(progress.is_complete());
    assert_eq!(progress.score, 20);
    assert_eq!(progress.collected, 2);
}

#[test]
fn test_collected_never_exceeds_total() {
    let mut progress = LevelProgress::new(1);
    progress.collect(5);
    progress.collect(5);

    assert_eq!(progress.collected, 1);
    assert_eq!(progress.score, 10);
}

#[test]
fn test_empty_level_is_never_complete() {
    assert!(!LevelProgress::new(0).is_complete());
}

#[test]
fn test_only_player_contacts_with_collectibles_count() {
    let mut world = World::new();
    let player = world.spawn_empty().id();
    let star = world.spawn_empty().id();
    let other_star = world.spawn_empty().id();
    let enemy = world.spawn_empty().id();

    let touched = touched_collectibles(
        [(star, player), (enemy, other_star), (player, enemy)],
        player,
        |entity| entity == star || entity == other_star,
    );

    assert_eq!(touched, vec![star]);
}

#[test]
fn test_star_touched_twice_is_collected_once() {
    let mut world = World::new();
    let player = world.spawn_empty().id();
    let star = world.spawn_empty().id();
    let mut progress = LevelProgress::new(2);

    let touched = touched_collectibles([(player, star), (star, player)], player, |e| e == star);
    for _ in &touched {
        progress.collect(10);
    }

    assert_eq!(touched.len(), 1);
    assert_eq!(progress.score, 10);
    assert!(!progress.is_complete());
}
