//! Movement domain: the kinematic body every actor moves through.
//!
//! The body owns velocity, acceleration and drag the way an arcade physics
//! body does. Controllers only touch it through its mutators. In the running
//! game avian2d integrates position and resolves solid contacts; the body
//! computes the velocity it should use and keeps a mirror of the position.

use bevy::prelude::*;

/// Contact flags resolved by the collision query for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactFlags {
    pub grounded: bool,
    pub blocked_left: bool,
    pub blocked_right: bool,
}

impl ContactFlags {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    /// Is movement in `direction` (sign of x) blocked?
    pub fn blocks(&self, direction: f32) -> bool {
        (direction > 0.0 && self.blocked_right) || (direction < 0.0 && self.blocked_left)
    }
}

#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    /// Horizontal drag applied while horizontal acceleration is zero.
    drag_x: f32,
    /// Downward acceleration magnitude.
    gravity: f32,
    gravity_suspended: bool,
    /// Horizontal speed cap, `None` while a dash or knockback owns velocity.
    max_speed_x: Option<f32>,
    /// Half extents of the body's box, used for proximity checks.
    pub half_size: Vec2,
    contacts: ContactFlags,
    collision_enabled: bool,
}

impl KinematicBody {
    pub fn new(position: Vec2, size: Vec2, gravity: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag_x: 0.0,
            gravity,
            gravity_suspended: false,
            max_speed_x: None,
            half_size: size * 0.5,
            contacts: ContactFlags::default(),
            collision_enabled: true,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    pub fn set_acceleration_x(&mut self, ax: f32) {
        self.acceleration.x = ax;
    }

    pub fn set_drag_x(&mut self, drag: f32) {
        self.drag_x = drag.max(0.0);
    }

    pub fn set_max_speed_x(&mut self, max_speed: Option<f32>) {
        self.max_speed_x = max_speed.map(f32::abs);
    }

    pub fn suspend_gravity(&mut self, suspended: bool) {
        self.gravity_suspended = suspended;
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts.grounded
    }

    pub fn is_blocked_left(&self) -> bool {
        self.contacts.blocked_left
    }

    pub fn is_blocked_right(&self) -> bool {
        self.contacts.blocked_right
    }

    pub fn contacts(&self) -> ContactFlags {
        self.contacts
    }

    /// Take the collision query result for this tick. `None` means the
    /// query was unavailable and the last known flags are kept. A body with
    /// collision disabled never reports contact.
    pub fn apply_contacts(&mut self, contacts: Option<ContactFlags>) {
        if !self.collision_enabled {
            self.contacts = ContactFlags::default();
            return;
        }
        if let Some(contacts) = contacts {
            self.contacts = contacts;
        }
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn disable_collision(&mut self) {
        self.collision_enabled = false;
        self.contacts = ContactFlags::default();
    }

    /// Stop all motion and gravity, leaving the body where it is.
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.gravity_suspended = true;
    }

    /// Advance velocity by one tick: acceleration or drag, the speed cap,
    /// then gravity. Landing on ground cancels downward velocity.
    pub fn integrate(&mut self, dt: f32) {
        if self.acceleration.x != 0.0 {
            self.velocity.x += self.acceleration.x * dt;
        } else if self.drag_x > 0.0 {
            let drag = self.drag_x * dt;
            if self.velocity.x > 0.0 {
                self.velocity.x = (self.velocity.x - drag).max(0.0);
            } else if self.velocity.x < 0.0 {
                self.velocity.x = (self.velocity.x + drag).min(0.0);
            }
        }

        if let Some(max_speed) = self.max_speed_x {
            self.velocity.x = self.velocity.x.clamp(-max_speed, max_speed);
        }

        if !self.gravity_suspended {
            self.velocity.y += self.acceleration.y * dt - self.gravity * dt;
            if self.contacts.grounded && self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }
    }

    /// Move the position mirror by the current velocity, respecting the
    /// blocked sides.
    pub fn advance(&mut self, dt: f32) {
        let mut step = self.velocity * dt;
        if self.contacts.blocks(step.x) {
            step.x = 0.0;
        }
        self.position += step;
    }

    /// `integrate` then `advance`, for headless stepping.
    pub fn step(&mut self, dt: f32) {
        self.integrate(dt);
        self.advance(dt);
    }

    /// Do the two bodies' boxes overlap?
    pub fn overlaps(&self, other: &KinematicBody) -> bool {
        let delta = (self.position - other.position).abs();
        let reach = self.half_size + other.half_size;
        delta.x < reach.x && delta.y < reach.y
    }
}
