//! Movement domain: the input-driven player state machine.
//!
//! Locomotion (grounded/airborne) and action (dash/attack/dead) are tracked
//! independently; [`PlayerController::state`] exposes their composition.

use bevy::prelude::*;

use crate::combat::{ActorId, AttackStartedEvent, CombatOutbox, Health, HitOutcome};
use crate::core::timing::{has_elapsed, progress, within_window};
use crate::movement::{Facing, KinematicBody, PlayerIntents, PlayerTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locomotion {
    #[default]
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAction {
    #[default]
    None,
    Dashing,
    Attacking,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    pub locomotion: Locomotion,
    pub action: PlayerAction,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    facing: Facing,
    grounded: bool,
    jumps_remaining: u8,
    has_jumped_once: bool,
    last_grounded_at: Option<f64>,
    jump_buffered_at: Option<f64>,
    /// Start of the current or last dash; the cooldown counts from here.
    dash_started_at: Option<f64>,
    dashing: bool,
    attack_started_at: Option<f64>,
    attacking: bool,
    invincible_until: Option<f64>,
    hurt_at: Option<f64>,
    dead: bool,
    /// Dev-tools override: ignore all damage.
    pub god_mode: bool,
}

impl PlayerController {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            facing: Facing::Right,
            grounded: false,
            jumps_remaining: tuning.max_jumps,
            has_jumped_once: false,
            last_grounded_at: None,
            jump_buffered_at: None,
            dash_started_at: None,
            dashing: false,
            attack_started_at: None,
            attacking: false,
            invincible_until: None,
            hurt_at: None,
            dead: false,
            god_mode: false,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn jumps_remaining(&self) -> u8 {
        self.jumps_remaining
    }

    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        self.god_mode || self.invincible_until.is_some_and(|until| now < until)
    }

    /// Fraction of the attack window played so far, while attacking.
    pub fn attack_progress(&self, now: f64, tuning: &PlayerTuning) -> Option<f32> {
        self.attacking
            .then(|| progress(self.attack_started_at, now, tuning.attack_duration))
    }

    pub fn is_knocked_back(&self, now: f64, tuning: &PlayerTuning) -> bool {
        within_window(self.hurt_at, now, tuning.knockback_time)
    }

    pub fn state(&self) -> PlayerState {
        let locomotion = if self.grounded {
            Locomotion::Grounded
        } else {
            Locomotion::Airborne
        };
        let action = if self.dead {
            PlayerAction::Dead
        } else if self.dashing {
            PlayerAction::Dashing
        } else if self.attacking {
            PlayerAction::Attacking
        } else {
            PlayerAction::None
        };
        PlayerState { locomotion, action }
    }

    /// Run one tick. Contact flags on `body` must already hold this tick's
    /// collision query result.
    pub fn update(
        &mut self,
        now: f64,
        intents: &PlayerIntents,
        body: &mut KinematicBody,
        tuning: &PlayerTuning,
        outbox: &mut CombatOutbox,
    ) {
        self.update_grounded(now, body, tuning);
        self.expire_actions(now, body, tuning);

        if self.dead {
            body.set_acceleration_x(0.0);
            return;
        }

        self.update_facing(intents);
        self.try_start_dash(now, intents, body, tuning);

        if self.dashing {
            self.apply_dash(body, tuning);
        } else if self.is_knocked_back(now, tuning) {
            body.set_acceleration_x(0.0);
            body.set_max_speed_x(None);
        } else {
            self.apply_horizontal_movement(intents, body, tuning);
        }

        self.handle_jump(now, intents, body, tuning);
        self.try_start_attack(now, intents, body, outbox);
    }

    fn update_grounded(&mut self, now: f64, body: &mut KinematicBody, tuning: &PlayerTuning) {
        let was_grounded = self.grounded;
        self.grounded = body.is_grounded();

        if self.grounded {
            if !was_grounded {
                self.jumps_remaining = tuning.max_jumps;
                self.has_jumped_once = false;
                debug!("Landed: jumps_remaining={}", self.jumps_remaining);
            }
            self.last_grounded_at = Some(now);
            body.set_drag_x(tuning.ground_drag);
        } else {
            body.set_drag_x(tuning.air_drag);
        }
    }

    fn expire_actions(&mut self, now: f64, body: &mut KinematicBody, tuning: &PlayerTuning) {
        if self.dashing && has_elapsed(self.dash_started_at, now, tuning.dash_duration) {
            self.dashing = false;
            body.suspend_gravity(false);
            body.set_max_speed_x(Some(tuning.move_speed));
            debug!("Dash ended");
        }
        if self.attacking && has_elapsed(self.attack_started_at, now, tuning.attack_duration) {
            self.attacking = false;
        }
    }

    fn update_facing(&mut self, intents: &PlayerIntents) {
        if self.dashing {
            return;
        }
        if let Some(facing) = Facing::from_direction(intents.horizontal()) {
            self.facing = facing;
        }
    }

    fn try_start_dash(
        &mut self,
        now: f64,
        intents: &PlayerIntents,
        body: &mut KinematicBody,
        tuning: &PlayerTuning,
    ) {
        if !intents.dash_just_pressed || self.dashing {
            return;
        }
        if !has_elapsed(self.dash_started_at, now, tuning.dash_cooldown) {
            return;
        }
        self.dashing = true;
        self.dash_started_at = Some(now);
        body.suspend_gravity(true);
        debug!("Dash started facing {:?}", self.facing);
    }

    /// Flat dash: horizontal speed re-asserted and gravity cancelled every
    /// tick of the window.
    fn apply_dash(&self, body: &mut KinematicBody, tuning: &PlayerTuning) {
        body.set_max_speed_x(None);
        body.set_acceleration_x(0.0);
        body.set_velocity_x(self.facing.sign() * tuning.dash_speed);
        body.set_velocity_y(0.0);
    }

    fn apply_horizontal_movement(
        &self,
        intents: &PlayerIntents,
        body: &mut KinematicBody,
        tuning: &PlayerTuning,
    ) {
        body.set_max_speed_x(Some(tuning.move_speed));

        let direction = intents.horizontal();
        if direction == 0.0 {
            // Drag handles the slowdown.
            body.set_acceleration_x(0.0);
            return;
        }

        let vx = body.velocity().x;
        if vx != 0.0 && vx.signum() != direction {
            // Turning around: no sliding overshoot.
            body.set_velocity_x(0.0);
        }

        let accel = if self.grounded {
            tuning.ground_accel
        } else {
            tuning.air_accel
        };
        body.set_acceleration_x(direction * accel);
    }

    fn handle_jump(
        &mut self,
        now: f64,
        intents: &PlayerIntents,
        body: &mut KinematicBody,
        tuning: &PlayerTuning,
    ) {
        if intents.jump_just_pressed {
            self.jump_buffered_at = Some(now);
        }
        if self.dashing {
            return;
        }

        let buffered = within_window(self.jump_buffered_at, now, tuning.jump_buffer_time);
        if !buffered || self.jumps_remaining == 0 {
            return;
        }

        let coyote = within_window(self.last_grounded_at, now, tuning.coyote_time);
        let air_jump = !self.grounded && self.has_jumped_once;
        if !(self.grounded || coyote || air_jump) {
            return;
        }

        body.set_velocity_y(tuning.jump_velocity);
        self.jumps_remaining -= 1;
        self.jump_buffered_at = None;
        if !self.has_jumped_once {
            // First jump of this takeoff closes the coyote window.
            self.has_jumped_once = true;
            self.last_grounded_at = None;
        }
        debug!(
            "Jump: grounded={}, jumps_remaining={}",
            self.grounded, self.jumps_remaining
        );
    }

    fn try_start_attack(
        &mut self,
        now: f64,
        intents: &PlayerIntents,
        body: &KinematicBody,
        outbox: &mut CombatOutbox,
    ) {
        if !intents.attack_just_pressed || self.attacking || self.dashing {
            return;
        }
        self.attacking = true;
        self.attack_started_at = Some(now);
        outbox.attacks_started.push(AttackStartedEvent {
            attacker: ActorId::Player,
            position: body.position,
        });
        debug!("Player attack started facing {:?}", self.facing);
    }

    /// Apply a hit from something at `source_x` (if known). Damage, the
    /// invincibility window and a knockback away from the source.
    pub fn take_hit(
        &mut self,
        amount: u32,
        source_x: Option<f32>,
        now: f64,
        health: &mut Health,
        body: &mut KinematicBody,
        tuning: &PlayerTuning,
    ) -> HitOutcome {
        if self.dead || self.is_invincible(now) {
            return HitOutcome::Ignored;
        }

        let taken = health.take_damage(amount);
        self.invincible_until = Some(now + tuning.invincibility_time as f64);
        self.hurt_at = Some(now);

        let away = source_x
            .filter(|x| x.is_finite())
            .and_then(|x| Facing::from_direction(body.position.x - x))
            .unwrap_or(self.facing.opposite());
        if self.dashing {
            self.dashing = false;
            body.suspend_gravity(false);
        }
        body.set_max_speed_x(None);
        body.set_acceleration_x(0.0);
        body.set_velocity(Vec2::new(
            away.sign() * tuning.knockback.x,
            tuning.knockback.y,
        ));
        debug!(
            "Player hit for {} ({}/{} left)",
            taken, health.current, health.max
        );

        if health.is_dead() {
            self.die(body);
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }

    fn die(&mut self, body: &mut KinematicBody) {
        self.dead = true;
        self.dashing = false;
        self.attacking = false;
        body.suspend_gravity(false);
        body.set_acceleration_x(0.0);
    }
}
