//! Combat domain: ECS glue for hit resolution and enemy cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::EnemyController;
use crate::combat::{
    AiRng, CombatOutbox, CombatResolver, CombatTuning, DamageDealtEvent, DeathEvent, Enemy,
    EnemyAttackIntent, EnemyParts, Health, PlayerParts,
};
use crate::core::RunConfig;
use crate::movement::{KinematicBody, Player, PlayerController, PlayerTuning};

/// Reseed the AI rolls so every attempt at a level replays identically.
pub(crate) fn seed_ai_rng(config: Res<RunConfig>, mut rng: ResMut<AiRng>) {
    *rng = AiRng::from_seed(config.seed);
    debug!("AI rng seeded with {}", config.seed);
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_combat(
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    player_tuning: Res<PlayerTuning>,
    mut resolver: ResMut<CombatResolver>,
    mut intent_events: MessageReader<EnemyAttackIntent>,
    mut player_query: Query<
        (&mut PlayerController, &mut KinematicBody, &mut Health),
        (With<Player>, Without<Enemy>),
    >,
    mut enemy_query: Query<
        (&mut EnemyController, &mut KinematicBody, &mut Health),
        (With<Enemy>, Without<Player>),
    >,
    mut damage: MessageWriter<DamageDealtEvent>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    let now = time.elapsed_secs_f64();
    let intents: Vec<EnemyAttackIntent> = intent_events.read().cloned().collect();

    let Ok((controller, body, health)) = player_query.single_mut() else {
        return;
    };
    let mut player = PlayerParts {
        controller: controller.into_inner(),
        body: body.into_inner(),
        health: health.into_inner(),
    };

    let mut enemies: Vec<EnemyParts> = enemy_query
        .iter_mut()
        .map(|(controller, body, health)| EnemyParts {
            controller: controller.into_inner(),
            body: body.into_inner(),
            health: health.into_inner(),
        })
        .collect();
    enemies.sort_by_key(|enemy| enemy.controller.id());

    let mut outbox = CombatOutbox::default();
    resolver.resolve(
        now,
        &mut player,
        &mut enemies,
        &intents,
        &tuning,
        &player_tuning,
        &mut outbox,
    );
    outbox.drain_outcomes(&mut damage, &mut deaths);
}

/// Once an enemy's death sequence cuts collision, stop avian colliding it.
pub(crate) fn sync_collision_layers(
    mut query: Query<(&KinematicBody, &mut CollisionLayers), Changed<KinematicBody>>,
) {
    for (body, mut layers) in &mut query {
        if !body.collision_enabled() && *layers != CollisionLayers::NONE {
            *layers = CollisionLayers::NONE;
        }
    }
}

/// Remove enemies whose death sequence has finished and release their ids.
pub(crate) fn despawn_finished_enemies(
    mut commands: Commands,
    mut resolver: ResMut<CombatResolver>,
    query: Query<(Entity, &EnemyController), With<Enemy>>,
) {
    for (entity, controller) in &query {
        if !controller.ready_for_removal() {
            continue;
        }
        resolver.release(controller.id());
        commands.entity(entity).despawn();
        info!(
            "Enemy {:?} removed ({} remaining)",
            controller.id(),
            resolver.live_count()
        );
    }
}
