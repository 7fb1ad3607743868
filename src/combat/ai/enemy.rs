//! Combat domain: the enemy state machine and its per-tick system.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::ai::death::{DeathPose, DeathSequence};
use crate::combat::{
    ActorId, AiRng, AttackStartedEvent, CombatOutbox, DamageDealtEvent, DeathEvent, Enemy,
    EnemyArchetype, EnemyAttackIntent, EnemyId, Health, HitOutcome, HitResponse,
};
use crate::core::timing::has_elapsed;
use crate::movement::{Facing, KinematicBody, Player, PlayerController};

/// Patrol walks with this fraction of the archetype's acceleration.
const PATROL_ACCEL_FACTOR: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Patrol,
    Chase,
    Attack,
    Knockback,
    Stunned,
    Idle,
    Dead,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyController {
    id: EnemyId,
    archetype: EnemyArchetype,
    state: EnemyState,
    state_started_at: f64,
    facing: Facing,
    patrol_origin_x: f32,
    patrol_direction: Facing,
    /// End of the last completed attack; the cooldown counts from here.
    last_attack_at: Option<f64>,
    knockback_direction: Facing,
    /// Seconds of hit flash left. Visual only.
    hit_flash: f32,
    death: Option<DeathSequence>,
}

impl EnemyController {
    pub fn new(id: EnemyId, archetype: EnemyArchetype, spawn_x: f32) -> Self {
        Self {
            id,
            archetype,
            state: EnemyState::Patrol,
            state_started_at: 0.0,
            facing: Facing::Right,
            patrol_origin_x: spawn_x,
            patrol_direction: Facing::Right,
            last_attack_at: None,
            knockback_direction: Facing::Left,
            hit_flash: 0.0,
            death: None,
        }
    }

    /// A body configured with this archetype's drag and speed cap.
    pub fn spawn_body(archetype: &EnemyArchetype, position: Vec2) -> KinematicBody {
        let mut body = KinematicBody::new(position, archetype.body_size.into(), archetype.gravity);
        body.set_drag_x(archetype.drag);
        body.set_max_speed_x(Some(archetype.move_speed));
        body
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn patrol_origin_x(&self) -> f32 {
        self.patrol_origin_x
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash > 0.0
    }

    pub fn death_pose(&self) -> Option<DeathPose> {
        self.death
            .as_ref()
            .map(|death| death.pose(&self.archetype.death))
    }

    pub fn death_sequence(&self) -> Option<&DeathSequence> {
        self.death.as_ref()
    }

    /// The death sequence has finished and the entity can be removed.
    pub fn ready_for_removal(&self) -> bool {
        self.death.as_ref().is_some_and(DeathSequence::is_complete)
    }

    fn enter(&mut self, state: EnemyState, now: f64) {
        if self.state != state {
            debug!("Enemy {:?}: {:?} -> {:?}", self.id, self.state, state);
        }
        self.state = state;
        self.state_started_at = now;
    }

    /// Run one tick. `player` is the target position, `None` when there is
    /// no live player to react to.
    pub fn update(
        &mut self,
        now: f64,
        dt: f32,
        body: &mut KinematicBody,
        player: Option<Vec2>,
        rng: &mut impl Rng,
        outbox: &mut CombatOutbox,
    ) {
        self.hit_flash = (self.hit_flash - dt).max(0.0);

        if let Some(death) = self.death.as_mut() {
            death.tick(now, body, &self.archetype.death);
            return;
        }

        let distance = player.map(|target| target.distance(body.position));
        let in_attack_range = distance.is_some_and(|d| d <= self.archetype.attack_range);
        let detected =
            self.archetype.chase && distance.is_some_and(|d| d <= self.archetype.detection_range);

        match self.state {
            EnemyState::Patrol => {
                if in_attack_range {
                    self.engage(now, body, player, outbox);
                } else if detected {
                    self.enter(EnemyState::Chase, now);
                    self.chase(body, player);
                } else {
                    self.patrol(dt, body);
                }
            }
            EnemyState::Chase => {
                if in_attack_range {
                    self.engage(now, body, player, outbox);
                } else if !detected {
                    self.enter(EnemyState::Patrol, now);
                    self.patrol(dt, body);
                } else {
                    self.chase(body, player);
                }
            }
            EnemyState::Attack => {
                body.set_acceleration_x(0.0);
                if has_elapsed(Some(self.state_started_at), now, self.archetype.attack_duration) {
                    self.last_attack_at = Some(now);
                    self.enter(EnemyState::Idle, now);
                }
            }
            EnemyState::Knockback => {
                body.set_acceleration_x(0.0);
                if has_elapsed(
                    Some(self.state_started_at),
                    now,
                    self.archetype.knockback_duration,
                ) {
                    body.set_max_speed_x(Some(self.archetype.move_speed));
                    self.enter(EnemyState::Idle, now);
                } else {
                    body.set_velocity_x(self.knockback_velocity());
                }
            }
            EnemyState::Stunned => {
                body.set_acceleration_x(0.0);
                if has_elapsed(Some(self.state_started_at), now, self.archetype.stun_duration) {
                    self.enter(EnemyState::Idle, now);
                }
            }
            EnemyState::Idle => {
                body.set_acceleration_x(0.0);
                if in_attack_range {
                    self.engage(now, body, player, outbox);
                } else if detected {
                    self.enter(EnemyState::Chase, now);
                } else if rng.random::<f32>() < self.archetype.idle_resume_chance {
                    self.enter(EnemyState::Patrol, now);
                }
            }
            EnemyState::Dead => {}
        }
    }

    /// Attack if the cooldown allows it, otherwise hold position.
    fn engage(
        &mut self,
        now: f64,
        body: &mut KinematicBody,
        player: Option<Vec2>,
        outbox: &mut CombatOutbox,
    ) {
        if let Some(facing) = player.and_then(|p| Facing::from_direction(p.x - body.position.x)) {
            self.facing = facing;
        }
        body.set_acceleration_x(0.0);

        if !has_elapsed(self.last_attack_at, now, self.archetype.attack_cooldown) {
            return;
        }

        self.enter(EnemyState::Attack, now);
        // The hit lands on entry, not on a wind-up frame.
        outbox.attacks_started.push(AttackStartedEvent {
            attacker: ActorId::Enemy(self.id),
            position: body.position,
        });
        outbox.enemy_attacks.push(EnemyAttackIntent {
            enemy: self.id,
            damage: self.archetype.attack_damage,
            position: body.position,
        });
    }

    /// Walk back and forth around the spawn point, turning before the next
    /// step could carry the body past the patrol bound.
    fn patrol(&mut self, dt: f32, body: &mut KinematicBody) {
        let speed = self.archetype.patrol_speed();
        let heading = self.patrol_direction.sign();
        let offset = body.position.x - self.patrol_origin_x;
        let at_bound = heading * offset + speed * dt >= self.archetype.patrol_distance;

        if at_bound || body.contacts().blocks(heading) {
            self.patrol_direction = self.patrol_direction.opposite();
            body.set_velocity_x(0.0);
        }

        self.facing = self.patrol_direction;
        body.set_max_speed_x(Some(speed));

        if body.contacts().blocks(self.patrol_direction.sign()) {
            body.set_acceleration_x(0.0);
        } else {
            body.set_acceleration_x(
                self.patrol_direction.sign() * self.archetype.accel * PATROL_ACCEL_FACTOR,
            );
        }
    }

    fn chase(&mut self, body: &mut KinematicBody, player: Option<Vec2>) {
        let Some(direction) = player.and_then(|p| Facing::from_direction(p.x - body.position.x))
        else {
            body.set_acceleration_x(0.0);
            return;
        };
        self.facing = direction;
        body.set_max_speed_x(Some(self.archetype.move_speed));

        if body.contacts().blocks(direction.sign()) {
            body.set_acceleration_x(0.0);
            if body.is_grounded() {
                // Hop the obstacle.
                body.set_velocity_y(self.archetype.jump_velocity);
            }
        } else {
            body.set_acceleration_x(direction.sign() * self.archetype.accel);
        }
    }

    fn knockback_velocity(&self) -> f32 {
        self.knockback_direction.sign() * self.archetype.knockback_speed
    }

    /// Apply a hit from something at `attacker_x` (if known).
    pub fn take_damage(
        &mut self,
        amount: u32,
        attacker_x: Option<f32>,
        now: f64,
        health: &mut Health,
        body: &mut KinematicBody,
        outbox: &mut CombatOutbox,
    ) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }

        let taken = health.take_damage(amount);
        self.hit_flash = self.archetype.hit_flash;
        self.knockback_direction = attacker_x
            .filter(|x| x.is_finite())
            .and_then(|x| Facing::from_direction(body.position.x - x))
            .unwrap_or(self.facing.opposite());
        debug!(
            "Enemy {:?} hit for {} ({}/{} left)",
            self.id, taken, health.current, health.max
        );

        if health.is_dead() {
            self.enter_death(now, body, outbox);
            return HitOutcome::Killed;
        }

        match self.archetype.hit_response {
            HitResponse::Knockback => {
                self.enter(EnemyState::Knockback, now);
                body.set_max_speed_x(None);
                body.set_acceleration_x(0.0);
                body.set_velocity_x(self.knockback_velocity());
            }
            HitResponse::Stunned => {
                self.enter(EnemyState::Stunned, now);
                body.set_acceleration_x(0.0);
                body.set_velocity_x(0.0);
            }
        }
        HitOutcome::Hurt
    }

    /// Enter the terminal Dead state. Calling it again does nothing.
    pub fn enter_death(&mut self, now: f64, body: &mut KinematicBody, outbox: &mut CombatOutbox) {
        if self.death.is_some() {
            return;
        }
        self.enter(EnemyState::Dead, now);
        self.death = Some(DeathSequence::begin(
            now,
            self.knockback_direction,
            body,
            &self.archetype.death,
        ));
        outbox.deaths.push(DeathEvent {
            actor: ActorId::Enemy(self.id),
            position: body.position,
        });
    }
}

pub(crate) fn update_enemies(
    time: Res<Time>,
    mut rng: ResMut<AiRng>,
    player_query: Query<(&KinematicBody, &PlayerController), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&EnemyId, &mut EnemyController, &mut KinematicBody), With<Enemy>>,
    mut attacks: MessageWriter<AttackStartedEvent>,
    mut damage: MessageWriter<DamageDealtEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    mut intents: MessageWriter<EnemyAttackIntent>,
) {
    let now = time.elapsed_secs_f64();
    let dt = time.delta_secs();

    let target = match player_query.single() {
        Ok((body, controller)) if !controller.is_dead() => Some(body.position),
        Ok(_) => None,
        Err(_) => {
            warn_once!("No player found; enemies have no target");
            None
        }
    };

    // Roster order keeps the AI rolls reproducible for a given seed.
    let mut enemies: Vec<_> = enemy_query.iter_mut().collect();
    enemies.sort_by_key(|(id, _, _)| **id);

    let mut outbox = CombatOutbox::default();
    for (_, mut controller, mut body) in enemies {
        controller.update(now, dt, &mut body, target, &mut rng.0, &mut outbox);
    }
    outbox.drain_into(&mut attacks, &mut damage, &mut deaths, &mut intents);
}
