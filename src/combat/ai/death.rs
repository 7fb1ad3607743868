//! Combat domain: the scripted enemy death sequence.
//!
//! Phases, all measured from the moment of death:
//! 1. fall: rotate a quarter turn toward the fall direction (ease-out cubic);
//! 2. drop: collision is cut and the body settles downward (smoothstep);
//! 3. hold the final pose;
//! 4. fade out from `fade_start * total_duration` to `total_duration`.
//!
//! Every output only moves forward, so ticking after completion is a no-op.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::combat::DeathTuning;
use crate::core::timing::{ease_out_cubic, elapsed_since, smoothstep};
use crate::movement::{Facing, KinematicBody};

/// Visual state of a dying actor for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathPose {
    /// Radians, counter-clockwise.
    pub rotation: f32,
    /// Downward offset from the body position.
    pub drop_offset: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct DeathSequence {
    started_at: f64,
    fall_direction: Facing,
    fall_progress: f32,
    drop_progress: f32,
    alpha: f32,
    collision_cut: bool,
    complete: bool,
}

impl DeathSequence {
    /// Start dying: the one-time impulse is applied here and nowhere else.
    pub fn begin(
        now: f64,
        fall_direction: Facing,
        body: &mut KinematicBody,
        tuning: &DeathTuning,
    ) -> Self {
        body.set_max_speed_x(None);
        body.set_acceleration_x(0.0);
        body.suspend_gravity(false);
        body.set_velocity(Vec2::new(
            fall_direction.sign() * tuning.impulse.x,
            tuning.impulse.y,
        ));

        Self {
            started_at: now,
            fall_direction,
            fall_progress: 0.0,
            drop_progress: 0.0,
            alpha: 1.0,
            collision_cut: false,
            complete: false,
        }
    }

    pub fn tick(&mut self, now: f64, body: &mut KinematicBody, tuning: &DeathTuning) {
        if self.complete {
            return;
        }
        let elapsed = elapsed_since(Some(self.started_at), now);

        self.fall_progress = self.fall_progress.max(phase(elapsed, tuning.fall_duration));

        if self.fall_progress >= 1.0 {
            if !self.collision_cut {
                self.collision_cut = true;
                body.disable_collision();
                body.freeze();
            }
            let drop_elapsed = elapsed - tuning.fall_duration;
            self.drop_progress = self
                .drop_progress
                .max(phase(drop_elapsed, tuning.drop_duration));
        }

        let fade_begin = tuning.fade_start.clamp(0.0, 1.0) * tuning.total_duration;
        let fade_alpha = 1.0 - phase(elapsed - fade_begin, tuning.total_duration - fade_begin);
        self.alpha = self.alpha.min(fade_alpha);

        if elapsed >= tuning.total_duration {
            self.fall_progress = 1.0;
            self.drop_progress = 1.0;
            self.alpha = 0.0;
            self.complete = true;
        }
    }

    pub fn pose(&self, tuning: &DeathTuning) -> DeathPose {
        DeathPose {
            // Falling toward +x is a clockwise (negative) turn.
            rotation: -self.fall_direction.sign() * FRAC_PI_2 * ease_out_cubic(self.fall_progress),
            drop_offset: smoothstep(self.drop_progress) * tuning.drop_distance,
            alpha: self.alpha,
        }
    }

    pub fn fall_direction(&self) -> Facing {
        self.fall_direction
    }

    pub fn collision_cut(&self) -> bool {
        self.collision_cut
    }

    /// The sequence has finished and the actor can be removed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Progress through a phase of `duration` seconds after `elapsed` seconds.
/// Zero-length phases complete immediately.
fn phase(elapsed: f32, duration: f32) -> f32 {
    if elapsed < 0.0 {
        0.0
    } else if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).min(1.0)
    }
}
