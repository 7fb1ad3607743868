//! Movement domain: input sampling for the player's intents.

use bevy::prelude::*;

use crate::movement::PlayerIntents;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut intents: ResMut<PlayerIntents>) {
    intents.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    intents.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    intents.jump_just_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyZ);
    intents.attack_just_pressed =
        keyboard.just_pressed(KeyCode::KeyX) || keyboard.just_pressed(KeyCode::KeyJ);
    intents.dash_just_pressed =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyK);
}
