//! Combat domain: health, enemy AI, hit resolution and combat messages.

mod ai;
mod components;
mod events;
mod resolver;
mod resources;
mod systems;


pub use ai::{EnemyController, EnemyState};
pub use components::{Enemy, EnemyId, Health, HitOutcome};
pub use events::{
    ActorId, AttackStartedEvent, CombatOutbox, DamageDealtEvent, DeathEvent, EnemyAttackIntent,
};
pub use resolver::{CombatResolver, EnemyParts, PlayerParts};
pub use resources::{
    AiRng, CombatTuning, DeathTuning, EnemyArchetype, EnemyArchetypes, HitResponse,
};

use bevy::prelude::*;

use crate::combat::ai::update_enemies;
use crate::combat::systems::{
    despawn_finished_enemies, resolve_combat, seed_ai_rng, sync_collision_layers,
};
use crate::core::{GameState, SimulationSet};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<EnemyArchetypes>()
            .init_resource::<CombatResolver>()
            .insert_resource(AiRng::from_seed(0))
            .add_message::<AttackStartedEvent>()
            .add_message::<DamageDealtEvent>()
            .add_message::<DeathEvent>()
            .add_message::<EnemyAttackIntent>()
            .add_systems(OnEnter(GameState::Run), seed_ai_rng)
            .add_systems(Update, update_enemies.in_set(SimulationSet::Enemies))
            .add_systems(Update, resolve_combat.in_set(SimulationSet::Resolve))
            .add_systems(
                Update,
                (sync_collision_layers, despawn_finished_enemies)
                    .chain()
                    .in_set(SimulationSet::Cleanup),
            );
    }
}
