//! Combat domain: scene-level hit resolution between the player and enemies.
//!
//! The resolver is also the enemy roster: it hands out [`EnemyId`]s at spawn
//! and keeps each enemy's cooldown record in a slot indexed by that id. Slots
//! are released explicitly when the enemy is removed.

use bevy::prelude::*;

use crate::combat::ai::EnemyController;
use crate::combat::{
    ActorId, CombatOutbox, CombatTuning, DamageDealtEvent, DeathEvent, EnemyAttackIntent, EnemyId,
    Health, HitOutcome,
};
use crate::core::timing::has_elapsed;
use crate::movement::{Facing, KinematicBody, PlayerController, PlayerTuning};

/// Read-only view every combatant offers the resolver.
pub trait Actor {
    fn position(&self) -> Vec2;
    fn facing(&self) -> Facing;
    fn is_dead(&self) -> bool;
}

/// Mutable access to the player's pieces for one resolution pass.
pub struct PlayerParts<'a> {
    pub controller: &'a mut PlayerController,
    pub body: &'a mut KinematicBody,
    pub health: &'a mut Health,
}

/// Mutable access to one enemy's pieces for one resolution pass.
pub struct EnemyParts<'a> {
    pub controller: &'a mut EnemyController,
    pub body: &'a mut KinematicBody,
    pub health: &'a mut Health,
}

impl Actor for PlayerParts<'_> {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn facing(&self) -> Facing {
        self.controller.facing()
    }

    fn is_dead(&self) -> bool {
        self.controller.is_dead()
    }
}

impl Actor for EnemyParts<'_> {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn facing(&self) -> Facing {
        self.controller.facing()
    }

    fn is_dead(&self) -> bool {
        self.controller.is_dead()
    }
}

/// Cooldowns between the player and one enemy.
#[derive(Debug, Clone, Copy, Default)]
struct PairCooldowns {
    /// Last time this enemy hurt the player, by contact or attack.
    last_enemy_hit: Option<f64>,
    /// Last time the player's attack hurt this enemy.
    last_player_hit: Option<f64>,
}

#[derive(Resource, Debug, Default)]
pub struct CombatResolver {
    slots: Vec<Option<PairCooldowns>>,
}

impl CombatResolver {
    /// Allocate a fresh id with clean cooldowns.
    pub fn register(&mut self) -> EnemyId {
        let id = EnemyId(self.slots.len() as u32);
        self.slots.push(Some(PairCooldowns::default()));
        id
    }

    /// Drop the enemy's cooldown record. The id is never handed out again
    /// until [`CombatResolver::reset`].
    pub fn release(&mut self, id: EnemyId) {
        if !self.is_registered(id) {
            warn!("Releasing unregistered enemy {:?}", id);
            return;
        }
        self.slots[id.index()] = None;
    }

    pub fn is_registered(&self, id: EnemyId) -> bool {
        self.slots.get(id.index()).is_some_and(Option::is_some)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Forget every enemy, for a level (re)load.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    fn cooldowns(&mut self, id: EnemyId) -> &mut PairCooldowns {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index].get_or_insert_with(PairCooldowns::default)
    }

    /// Run every cross-actor rule for this tick: body contact, the player's
    /// attack, then pending enemy attack intents.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &mut self,
        now: f64,
        player: &mut PlayerParts,
        enemies: &mut [EnemyParts],
        intents: &[EnemyAttackIntent],
        tuning: &CombatTuning,
        player_tuning: &PlayerTuning,
        outbox: &mut CombatOutbox,
    ) {
        self.resolve_contacts(now, player, enemies, tuning, player_tuning, outbox);
        self.resolve_player_attack(now, player, enemies, tuning, outbox);
        for intent in intents {
            self.resolve_enemy_attack(now, player, intent, tuning, player_tuning, outbox);
        }
    }

    fn resolve_contacts(
        &mut self,
        now: f64,
        player: &mut PlayerParts,
        enemies: &mut [EnemyParts],
        tuning: &CombatTuning,
        player_tuning: &PlayerTuning,
        outbox: &mut CombatOutbox,
    ) {
        for enemy in enemies.iter_mut() {
            if player.is_dead() || player.controller.is_invincible(now) {
                return;
            }
            // Dead bodies have no solid response and deal no damage.
            if enemy.is_dead() || !player.body.overlaps(enemy.body) {
                continue;
            }

            let id = enemy.controller.id();
            let cooldowns = self.cooldowns(id);
            if !has_elapsed(cooldowns.last_enemy_hit, now, tuning.collision_cooldown) {
                continue;
            }

            let source = enemy.position();
            let outcome = player.controller.take_hit(
                tuning.contact_damage,
                Some(source.x),
                now,
                player.health,
                player.body,
                player_tuning,
            );
            if outcome != HitOutcome::Ignored {
                cooldowns.last_enemy_hit = Some(now);
                record_player_hit(player, outcome, tuning.contact_damage, source, outbox);
            }
        }
    }

    fn resolve_player_attack(
        &mut self,
        now: f64,
        player: &mut PlayerParts,
        enemies: &mut [EnemyParts],
        tuning: &CombatTuning,
        outbox: &mut CombatOutbox,
    ) {
        if player.is_dead() || !player.controller.is_attacking() {
            return;
        }
        let origin = player.position();
        let facing = player.facing();

        for enemy in enemies.iter_mut() {
            if enemy.is_dead() {
                continue;
            }
            let target = enemy.position();
            if origin.distance(target) > tuning.player_attack_range {
                continue;
            }
            // Directly above or below counts as in front.
            if Facing::from_direction(target.x - origin.x).is_some_and(|side| side != facing) {
                continue;
            }

            let cooldowns = self.cooldowns(enemy.controller.id());
            if !has_elapsed(cooldowns.last_player_hit, now, tuning.player_attack_cooldown) {
                continue;
            }

            let outcome = enemy.controller.take_damage(
                tuning.player_attack_damage,
                Some(origin.x),
                now,
                enemy.health,
                enemy.body,
                outbox,
            );
            if outcome != HitOutcome::Ignored {
                cooldowns.last_player_hit = Some(now);
                outbox.damage_dealt.push(DamageDealtEvent {
                    target: ActorId::Enemy(enemy.controller.id()),
                    amount: tuning.player_attack_damage,
                    source_position: origin,
                });
            }
        }
    }

    /// An enemy attack shares the contact cooldown, so one enemy never hurts
    /// the player twice within `collision_cooldown`.
    fn resolve_enemy_attack(
        &mut self,
        now: f64,
        player: &mut PlayerParts,
        intent: &EnemyAttackIntent,
        tuning: &CombatTuning,
        player_tuning: &PlayerTuning,
        outbox: &mut CombatOutbox,
    ) {
        if player.position().distance(intent.position) > tuning.enemy_hit_proximity {
            return;
        }
        let cooldowns = self.cooldowns(intent.enemy);
        if !has_elapsed(cooldowns.last_enemy_hit, now, tuning.collision_cooldown) {
            return;
        }

        let outcome = player.controller.take_hit(
            intent.damage,
            Some(intent.position.x),
            now,
            player.health,
            player.body,
            player_tuning,
        );
        if outcome != HitOutcome::Ignored {
            cooldowns.last_enemy_hit = Some(now);
        }
        record_player_hit(player, outcome, intent.damage, intent.position, outbox);
    }
}

fn record_player_hit(
    player: &PlayerParts,
    outcome: HitOutcome,
    amount: u32,
    source_position: Vec2,
    outbox: &mut CombatOutbox,
) {
    if outcome == HitOutcome::Ignored {
        return;
    }
    outbox.damage_dealt.push(DamageDealtEvent {
        target: ActorId::Player,
        amount,
        source_position,
    });
    if outcome == HitOutcome::Killed {
        outbox.deaths.push(DeathEvent {
            actor: ActorId::Player,
            position: player.position(),
        });
    }
}
