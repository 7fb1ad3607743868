//! Level domain: spawning and tearing down the level's entities.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{CombatResolver, Enemy, EnemyArchetypes, EnemyController, Health};
use crate::content::{GeometryKind, LevelDef};
use crate::level::{Collectible, LevelEntity, LevelProgress};
use crate::movement::{GameLayer, KinematicBody, Player, PlayerController, PlayerTuning};
use crate::sprites::{AnimationController, spawn_body_sprite, spawn_weapon_sprite};

const GROUND_COLOR: Color = Color::srgb(0.35, 0.4, 0.35);
const WALL_COLOR: Color = Color::srgb(0.25, 0.25, 0.35);
const PLAYER_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const ENEMY_COLOR: Color = Color::srgb(0.75, 0.45, 0.3);
const COLLECTIBLE_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const COLLECTIBLE_SIZE: f32 = 16.0;
/// Pickup radius around a collectible's centre.
const PICKUP_RADIUS: f32 = 8.0;

pub(crate) fn spawn_level(
    mut commands: Commands,
    level: Res<LevelDef>,
    player_tuning: Res<PlayerTuning>,
    archetypes: Res<EnemyArchetypes>,
    mut resolver: ResMut<CombatResolver>,
    mut progress: ResMut<LevelProgress>,
) {
    resolver.reset();
    *progress = LevelProgress::new(level.collectibles.len() as u32);

    spawn_geometry(&mut commands, &level);
    spawn_player(&mut commands, &level, &player_tuning);

    for spawn in &level.enemies {
        let Some(archetype) = archetypes.get(&spawn.archetype) else {
            warn!("Unknown enemy archetype '{}', skipping spawn", spawn.archetype);
            continue;
        };
        let id = resolver.register();
        let position: Vec2 = spawn.position.into();
        let size: Vec2 = archetype.body_size.into();

        commands
            .spawn((
                (
                    LevelEntity,
                    Enemy,
                    id,
                    EnemyController::new(id, archetype.clone(), position.x),
                    Health::new(archetype.max_health),
                    EnemyController::spawn_body(archetype, position),
                    AnimationController::default(),
                ),
                Transform::from_translation(position.extend(1.0)),
                Visibility::default(),
                (
                    RigidBody::Dynamic,
                    Collider::rectangle(size.x, size.y),
                    LockedAxes::ROTATION_LOCKED,
                    LinearVelocity::default(),
                    GravityScale(0.0), // Gravity is integrated by KinematicBody
                    Friction::new(0.0),
                    CollisionLayers::new(GameLayer::Enemy, [GameLayer::Ground, GameLayer::Wall]),
                ),
            ))
            .with_children(|parent| spawn_body_sprite(parent, ENEMY_COLOR, size));
    }

    for position in &level.collectibles {
        commands.spawn((
            LevelEntity,
            Collectible {
                value: level.collectible_value,
            },
            Sprite {
                color: COLLECTIBLE_COLOR,
                custom_size: Some(Vec2::splat(COLLECTIBLE_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.5),
            Collider::circle(PICKUP_RADIUS),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }

    info!(
        "Spawned level '{}': {} enemies, {} collectibles",
        level.name,
        resolver.live_count(),
        level.collectibles.len()
    );
}

fn spawn_geometry(commands: &mut Commands, level: &LevelDef) {
    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]);

    for platform in &level.platforms {
        let size: Vec2 = platform.size.into();
        let mut entity = commands.spawn((
            LevelEntity,
            Transform::from_xyz(platform.position.x, platform.position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        match platform.kind {
            GeometryKind::Ground => {
                entity.insert((
                    ground_layers,
                    Sprite {
                        color: GROUND_COLOR,
                        custom_size: Some(size),
                        ..default()
                    },
                ));
            }
            GeometryKind::Wall => {
                entity.insert((
                    wall_layers,
                    Sprite {
                        color: WALL_COLOR,
                        custom_size: Some(size),
                        ..default()
                    },
                ));
            }
        }
    }
}

fn spawn_player(commands: &mut Commands, level: &LevelDef, tuning: &PlayerTuning) {
    let position: Vec2 = level.player_spawn.into();
    let size: Vec2 = tuning.body_size.into();
    let mut body = KinematicBody::new(position, size, tuning.gravity);
    body.set_max_speed_x(Some(tuning.move_speed));

    commands
        .spawn((
            (
                LevelEntity,
                Player,
                PlayerController::new(tuning),
                Health::new(tuning.max_health),
                body,
                AnimationController::default(),
            ),
            Transform::from_translation(position.extend(2.0)),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Gravity is integrated by KinematicBody
                Friction::new(0.0),
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
                ),
            ),
        ))
        .with_children(|parent| {
            spawn_body_sprite(parent, PLAYER_COLOR, size);
            spawn_weapon_sprite(parent);
        });
}

pub(crate) fn despawn_level(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
