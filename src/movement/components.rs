//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    /// Layer 0, reserved by avian; nothing is assigned to it.
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Pickups and triggers - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Horizontal facing. Never "none": it keeps its last value when no
/// direction is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing for a horizontal direction; `None` for zero.
    pub fn from_direction(direction: f32) -> Option<Self> {
        if direction > 0.0 {
            Some(Facing::Right)
        } else if direction < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}
