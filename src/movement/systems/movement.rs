//! Movement domain: player tick and body integration systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{AttackStartedEvent, CombatOutbox};
use crate::movement::{KinematicBody, Player, PlayerController, PlayerIntents, PlayerTuning};

/// Pull the physics step's results into the body mirrors.
pub(crate) fn sync_bodies_from_physics(
    mut query: Query<(&mut KinematicBody, &Transform, &LinearVelocity)>,
) {
    for (mut body, transform, velocity) in &mut query {
        body.position = transform.translation.truncate();
        body.set_velocity(velocity.0);
    }
}

pub(crate) fn update_player(
    time: Res<Time>,
    intents: Res<PlayerIntents>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&mut PlayerController, &mut KinematicBody), With<Player>>,
    mut attacks: MessageWriter<AttackStartedEvent>,
) {
    let now = time.elapsed_secs_f64();
    let mut outbox = CombatOutbox::default();

    for (mut controller, mut body) in &mut query {
        controller.update(now, &intents, &mut body, &tuning, &mut outbox);
    }

    for event in outbox.attacks_started.drain(..) {
        attacks.write(event);
    }
}

/// Advance every body's velocity and hand it to the physics step.
pub(crate) fn integrate_bodies(
    time: Res<Time>,
    mut query: Query<(&mut KinematicBody, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();

    for (mut body, mut velocity) in &mut query {
        body.integrate(dt);
        velocity.0 = body.velocity();
    }
}
