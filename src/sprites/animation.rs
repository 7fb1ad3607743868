//! Animation signals for the renderer.
//!
//! Each actor publishes one [`AnimationState`] per tick derived from its
//! controller, plus an [`AnimationStateChanged`] message when it changes.
//! Body sprites are flipped, tinted and posed from the same state.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;

use super::BodySprite;
use crate::combat::{EnemyController, EnemyState};
use crate::movement::{Facing, KinematicBody, Player, PlayerController, PlayerTuning};

/// Below this horizontal speed an actor counts as standing still.
const RUN_THRESHOLD: f32 = 10.0;

const HIT_FLASH_COLOR: Color = Color::srgb(1.0, 0.25, 0.25);

/// Animation states for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Dash,
    Attack,
    Hurt,
    Death,
}

/// Component tracking the published animation state.
#[derive(Component, Debug, Default)]
pub struct AnimationController {
    pub state: AnimationState,
    /// Previous state (for detecting transitions).
    pub previous_state: AnimationState,
}

impl AnimationController {
    /// Set the animation state. Returns the previous state if it changed.
    pub fn set_state(&mut self, state: AnimationState) -> Option<AnimationState> {
        if self.state == state {
            return None;
        }
        self.previous_state = self.state;
        self.state = state;
        Some(self.previous_state)
    }
}

/// Message fired when animation state changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationState,
    pub to: AnimationState,
}

impl Message for AnimationStateChanged {}

fn locomotion_state(body: &KinematicBody) -> AnimationState {
    let velocity = body.velocity();
    if !body.is_grounded() {
        if velocity.y > 0.0 {
            AnimationState::Jump
        } else {
            AnimationState::Fall
        }
    } else if velocity.x.abs() > RUN_THRESHOLD {
        AnimationState::Run
    } else {
        AnimationState::Idle
    }
}

pub fn player_animation_state(
    controller: &PlayerController,
    body: &KinematicBody,
    now: f64,
    tuning: &PlayerTuning,
) -> AnimationState {
    if controller.is_dead() {
        AnimationState::Death
    } else if controller.is_dashing() {
        AnimationState::Dash
    } else if controller.is_attacking() {
        AnimationState::Attack
    } else if controller.is_knocked_back(now, tuning) {
        AnimationState::Hurt
    } else {
        locomotion_state(body)
    }
}

pub fn enemy_animation_state(controller: &EnemyController, body: &KinematicBody) -> AnimationState {
    match controller.state() {
        EnemyState::Dead => AnimationState::Death,
        EnemyState::Attack => AnimationState::Attack,
        EnemyState::Knockback | EnemyState::Stunned => AnimationState::Hurt,
        EnemyState::Idle => AnimationState::Idle,
        EnemyState::Patrol | EnemyState::Chase => locomotion_state(body),
    }
}

pub fn update_player_animation(
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    mut query: Query<
        (Entity, &PlayerController, &KinematicBody, &mut AnimationController),
        With<Player>,
    >,
    mut changed_events: MessageWriter<AnimationStateChanged>,
) {
    let now = time.elapsed_secs_f64();
    for (entity, controller, body, mut animation) in &mut query {
        let state = player_animation_state(controller, body, now, &tuning);
        if let Some(from) = animation.set_state(state) {
            changed_events.write(AnimationStateChanged {
                entity,
                from,
                to: state,
            });
        }
    }
}

pub fn update_enemy_animation(
    mut query: Query<(Entity, &EnemyController, &KinematicBody, &mut AnimationController)>,
    mut changed_events: MessageWriter<AnimationStateChanged>,
) {
    for (entity, controller, body, mut animation) in &mut query {
        let state = enemy_animation_state(controller, body);
        if let Some(from) = animation.set_state(state) {
            changed_events.write(AnimationStateChanged {
                entity,
                from,
                to: state,
            });
        }
    }
}

/// Flip the player's body by facing and blink it while invincible.
pub fn apply_player_visuals(
    time: Res<Time>,
    player_query: Query<(&PlayerController, &Children), With<Player>>,
    mut sprite_query: Query<(&mut Sprite, &BodySprite)>,
) {
    let now = time.elapsed_secs_f64();
    // Blink at 10 Hz.
    let blink_off = (now * 10.0) as i64 % 2 == 0;

    for (controller, children) in &player_query {
        for child in children.iter() {
            let Ok((mut sprite, body)) = sprite_query.get_mut(child) else {
                continue;
            };
            sprite.flip_x = controller.facing() == Facing::Left;
            let alpha = if controller.is_invincible(now) && !controller.is_dead() && blink_off {
                0.4
            } else {
                1.0
            };
            sprite.color = body.base_color.with_alpha(alpha);
        }
    }
}

/// Flip, hit-flash and death-pose enemy bodies.
pub fn apply_enemy_visuals(
    enemy_query: Query<(&EnemyController, &Children)>,
    mut sprite_query: Query<(&mut Sprite, &mut Transform, &BodySprite)>,
) {
    for (controller, children) in &enemy_query {
        for child in children.iter() {
            let Ok((mut sprite, mut transform, body)) = sprite_query.get_mut(child) else {
                continue;
            };
            sprite.flip_x = controller.facing() == Facing::Left;
            let color = if controller.is_flashing() {
                HIT_FLASH_COLOR
            } else {
                body.base_color
            };

            match controller.death_pose() {
                Some(pose) => {
                    transform.rotation = Quat::from_rotation_z(pose.rotation);
                    transform.translation.y = -pose.drop_offset;
                    sprite.color = color.with_alpha(pose.alpha);
                }
                None => sprite.color = color,
            }
        }
    }
}
