//! Layered sprite components.
//!
//! Actors keep physics on the root entity and draw through child sprites, so
//! visual rotation and offsets never fight the physics transform.

use bevy::prelude::*;

/// Defines the render order for sprite layers.
/// Lower values render behind higher values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteLayer {
    /// Character body (base layer).
    Body = 10,
    /// Weapon layer.
    Weapon = 30,
}

impl SpriteLayer {
    /// Convert to Z coordinate for 2D ordering.
    pub fn z_index(&self) -> f32 {
        (*self as i32) as f32 * 0.01
    }
}

/// The drawn body of an actor.
#[derive(Component, Debug)]
pub struct BodySprite {
    pub base_color: Color,
}

/// The weapon overlay following the player.
#[derive(Component, Debug, Default)]
pub struct WeaponSprite;

/// Spawn an actor's body sprite as a child of the physics root.
pub fn spawn_body_sprite(parent: &mut ChildSpawnerCommands, color: Color, size: Vec2) {
    parent.spawn((
        BodySprite { base_color: color },
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, SpriteLayer::Body.z_index()),
    ));
}

/// Spawn the player's weapon overlay, hidden until an attack starts.
pub fn spawn_weapon_sprite(parent: &mut ChildSpawnerCommands) {
    parent.spawn((
        WeaponSprite,
        Sprite {
            color: Color::srgb(0.85, 0.85, 0.9),
            custom_size: Some(Vec2::new(30.0, 6.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, SpriteLayer::Weapon.z_index()),
        Visibility::Hidden,
    ));
}
