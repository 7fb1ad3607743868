//! Weapon overlay positioning.
//!
//! The attack window is split into three equal frames. Each frame has a fixed
//! pose relative to the body centre, written for a right-facing actor and
//! mirrored for a left-facing one.

use bevy::prelude::*;

use super::WeaponSprite;
use crate::movement::{Facing, Player, PlayerController, PlayerTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponFrame {
    /// Wind-up: weapon raised behind the head.
    Raised,
    /// Mid-swing: weapon horizontal in front.
    Swing,
    /// Follow-through: weapon extended low.
    FollowThrough,
}

impl WeaponFrame {
    /// Frame for a fraction of the attack window.
    pub fn at(progress: f32) -> Self {
        if progress < 1.0 / 3.0 {
            WeaponFrame::Raised
        } else if progress < 2.0 / 3.0 {
            WeaponFrame::Swing
        } else {
            WeaponFrame::FollowThrough
        }
    }
}

/// Offset from the body centre and rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponPose {
    pub offset: Vec2,
    pub rotation: f32,
}

/// Pose for a frame, mirrored by facing.
pub fn weapon_pose(frame: WeaponFrame, facing: Facing) -> WeaponPose {
    let (offset, rotation) = match frame {
        WeaponFrame::Raised => (Vec2::new(-4.0, 22.0), 2.4),
        WeaponFrame::Swing => (Vec2::new(20.0, 6.0), 0.0),
        WeaponFrame::FollowThrough => (Vec2::new(22.0, -10.0), -0.8),
    };
    let sign = facing.sign();
    WeaponPose {
        offset: Vec2::new(offset.x * sign, offset.y),
        rotation: rotation * sign,
    }
}

/// Show the weapon only while the player attacks, posed by attack progress.
pub fn update_weapon_overlay(
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    player_query: Query<(&PlayerController, &Children), With<Player>>,
    mut weapon_query: Query<(&mut Transform, &mut Visibility, &mut Sprite), With<WeaponSprite>>,
) {
    let now = time.elapsed_secs_f64();

    for (controller, children) in &player_query {
        let progress = controller
            .attack_progress(now, &tuning)
            .filter(|_| !controller.is_dead());

        for child in children.iter() {
            let Ok((mut transform, mut visibility, mut sprite)) = weapon_query.get_mut(child)
            else {
                continue;
            };
            let Some(progress) = progress else {
                *visibility = Visibility::Hidden;
                continue;
            };

            let pose = weapon_pose(WeaponFrame::at(progress), controller.facing());
            *visibility = Visibility::Inherited;
            sprite.flip_x = controller.facing() == Facing::Left;
            transform.translation.x = pose.offset.x;
            transform.translation.y = pose.offset.y;
            transform.rotation = Quat::from_rotation_z(pose.rotation);
        }
    }
}
