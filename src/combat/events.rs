//! Combat domain: combat-related events.
//!
//! The state machines push into a [`CombatOutbox`] while they run; the ECS
//! glue drains it into Bevy messages once per tick so ordering stays the
//! order in which things happened.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::EnemyId;

/// Which actor an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorId {
    Player,
    Enemy(EnemyId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackStartedEvent {
    pub attacker: ActorId,
    pub position: Vec2,
}

impl Message for AttackStartedEvent {}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageDealtEvent {
    pub target: ActorId,
    pub amount: u32,
    pub source_position: Vec2,
}

impl Message for DamageDealtEvent {}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathEvent {
    pub actor: ActorId,
    pub position: Vec2,
}

impl Message for DeathEvent {}

/// An enemy's attack landed on entry; the resolver decides whether the
/// player is close enough to be hurt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyAttackIntent {
    pub enemy: EnemyId,
    pub damage: u32,
    pub position: Vec2,
}

impl Message for EnemyAttackIntent {}

/// Per-tick event queue filled by controllers and the resolver.
#[derive(Debug, Default)]
pub struct CombatOutbox {
    pub attacks_started: Vec<AttackStartedEvent>,
    pub damage_dealt: Vec<DamageDealtEvent>,
    pub deaths: Vec<DeathEvent>,
    pub enemy_attacks: Vec<EnemyAttackIntent>,
}

impl CombatOutbox {
    pub fn is_empty(&self) -> bool {
        self.attacks_started.is_empty()
            && self.damage_dealt.is_empty()
            && self.deaths.is_empty()
            && self.enemy_attacks.is_empty()
    }

    /// Write every queued event to its message channel, emptying the queue.
    pub fn drain_into(
        &mut self,
        attacks: &mut MessageWriter<AttackStartedEvent>,
        damage: &mut MessageWriter<DamageDealtEvent>,
        deaths: &mut MessageWriter<DeathEvent>,
        intents: &mut MessageWriter<EnemyAttackIntent>,
    ) {
        for event in self.attacks_started.drain(..) {
            attacks.write(event);
        }
        self.drain_outcomes(damage, deaths);
        for event in self.enemy_attacks.drain(..) {
            intents.write(event);
        }
    }

    /// Write only damage and deaths, for systems that consume attack intents.
    pub fn drain_outcomes(
        &mut self,
        damage: &mut MessageWriter<DamageDealtEvent>,
        deaths: &mut MessageWriter<DeathEvent>,
    ) {
        for event in self.damage_dealt.drain(..) {
            damage.write(event);
        }
        for event in self.deaths.drain(..) {
            info!(
                "{:?} died at ({:.0}, {:.0})",
                event.actor, event.position.x, event.position.y
            );
            deaths.write(event);
        }
    }
}
