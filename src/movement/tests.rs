//! Movement domain: tests for the kinematic body and the player controller.

use bevy::prelude::Vec2;

use super::controller::{Locomotion, PlayerAction};
use super::{ContactFlags, Facing, KinematicBody, PlayerController, PlayerIntents, PlayerTuning};
use crate::combat::{CombatOutbox, Health, HitOutcome};

const DT: f32 = 1.0 / 60.0;

fn airborne() -> ContactFlags {
    ContactFlags::default()
}

fn spawn_player(tuning: &PlayerTuning) -> (PlayerController, KinematicBody) {
    let mut body = KinematicBody::new(
        Vec2::new(100.0, 100.0),
        tuning.body_size.into(),
        tuning.gravity,
    );
    body.set_max_speed_x(Some(tuning.move_speed));
    (PlayerController::new(tuning), body)
}

/// Feed contacts and run the controller, without integrating.
fn update(
    controller: &mut PlayerController,
    body: &mut KinematicBody,
    tuning: &PlayerTuning,
    now: f64,
    intents: PlayerIntents,
    contacts: ContactFlags,
) -> CombatOutbox {
    let mut outbox = CombatOutbox::default();
    body.apply_contacts(Some(contacts));
    controller.update(now, &intents, body, tuning, &mut outbox);
    outbox
}

fn jump() -> PlayerIntents {
    PlayerIntents {
        jump_just_pressed: true,
        ..Default::default()
    }
}

fn dash() -> PlayerIntents {
    PlayerIntents {
        dash_just_pressed: true,
        ..Default::default()
    }
}

fn attack() -> PlayerIntents {
    PlayerIntents {
        attack_just_pressed: true,
        ..Default::default()
    }
}

fn hold(left: bool, right: bool) -> PlayerIntents {
    PlayerIntents {
        left,
        right,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Intent tests
// -----------------------------------------------------------------------------

#[test]
fn test_both_directions_cancel_out() {
    assert_eq!(hold(true, true).horizontal(), 0.0);
    assert_eq!(hold(true, false).horizontal(), -1.0);
    assert_eq!(hold(false, true).horizontal(), 1.0);
    assert_eq!(PlayerIntents::default().horizontal(), 0.0);
}

// -----------------------------------------------------------------------------
// KinematicBody tests
// -----------------------------------------------------------------------------

#[test]
fn test_missing_collision_result_holds_last_flags() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.apply_contacts(Some(ContactFlags {
        grounded: true,
        blocked_left: true,
        blocked_right: false,
    }));

    body.apply_contacts(None);

    assert!(body.is_grounded());
    assert!(body.is_blocked_left());
    assert!(!body.is_blocked_right());
}

#[test]
fn test_disabled_collision_reports_no_contact() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.apply_contacts(Some(ContactFlags::grounded()));

    body.disable_collision();
    body.apply_contacts(Some(ContactFlags::grounded()));

    assert!(!body.collision_enabled());
    assert_eq!(body.contacts(), ContactFlags::default());
}

#[test]
fn test_drag_stops_without_reversing() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.set_drag_x(2000.0);
    body.set_velocity_x(10.0);

    body.integrate(DT);

    assert_eq!(body.velocity().x, 0.0);
}

#[test]
fn test_drag_ignored_while_accelerating() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.set_drag_x(2000.0);
    body.set_acceleration_x(600.0);

    body.integrate(0.5);

    assert_eq!(body.velocity().x, 300.0);
}

#[test]
fn test_speed_cap_clamps_after_acceleration() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.set_max_speed_x(Some(300.0));
    body.set_acceleration_x(-2000.0);

    body.integrate(1.0);

    assert_eq!(body.velocity().x, -300.0);
}

#[test]
fn test_grounded_body_does_not_sink() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 2000.0);
    body.apply_contacts(Some(ContactFlags::grounded()));

    body.step(DT);

    assert_eq!(body.velocity().y, 0.0);
    assert_eq!(body.position.y, 0.0);
}

#[test]
fn test_blocked_side_stops_horizontal_advance() {
    let mut body = KinematicBody::new(Vec2::ZERO, Vec2::splat(10.0), 0.0);
    body.apply_contacts(Some(ContactFlags {
        blocked_right: true,
        ..Default::default()
    }));
    body.set_velocity(Vec2::new(100.0, 0.0));

    body.advance(0.1);
    assert_eq!(body.position.x, 0.0);

    body.set_velocity(Vec2::new(-100.0, 0.0));
    body.advance(0.1);
    assert!(body.position.x < 0.0);
}

#[test]
fn test_overlap_uses_box_extents() {
    let a = KinematicBody::new(Vec2::ZERO, Vec2::new(24.0, 48.0), 0.0);
    let near = KinematicBody::new(Vec2::new(20.0, 0.0), Vec2::new(24.0, 32.0), 0.0);
    let far = KinematicBody::new(Vec2::new(30.0, 0.0), Vec2::new(24.0, 32.0), 0.0);

    assert!(a.overlaps(&near));
    assert!(!a.overlaps(&far));
}

// -----------------------------------------------------------------------------
// Horizontal movement tests
// -----------------------------------------------------------------------------

#[test]
fn test_direction_switch_zeroes_velocity_before_accelerating() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    body.set_velocity_x(250.0);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        hold(true, false),
        ContactFlags::grounded(),
    );

    assert_eq!(body.velocity().x, 0.0);
    assert_eq!(body.acceleration().x, -tuning.ground_accel);
    assert_eq!(controller.facing(), Facing::Left);
}

#[test]
fn test_same_direction_keeps_velocity() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    body.set_velocity_x(250.0);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        hold(false, true),
        ContactFlags::grounded(),
    );

    assert_eq!(body.velocity().x, 250.0);
}

#[test]
fn test_air_control_uses_air_acceleration_and_drag() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(&mut controller, &mut body, &tuning, 0.0, hold(false, true), airborne());
    assert_eq!(body.acceleration().x, tuning.air_accel);

    // Released mid-air: air drag slows the body.
    body.set_velocity_x(200.0);
    update(
        &mut controller,
        &mut body,
        &tuning,
        0.1,
        PlayerIntents::default(),
        airborne(),
    );
    body.integrate(0.1);
    assert_eq!(body.velocity().x, 200.0 - tuning.air_drag * 0.1);
}

#[test]
fn test_running_never_exceeds_move_speed() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    for tick in 0..120 {
        let now = tick as f64 * DT as f64;
        update(
            &mut controller,
            &mut body,
            &tuning,
            now,
            hold(false, true),
            ContactFlags::grounded(),
        );
        body.step(DT);
        assert!(body.velocity().x.abs() <= tuning.move_speed);
    }
    assert_eq!(body.velocity().x, tuning.move_speed);
}

#[test]
fn test_facing_persists_without_input() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        hold(true, false),
        ContactFlags::grounded(),
    );
    update(
        &mut controller,
        &mut body,
        &tuning,
        0.1,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );

    assert_eq!(controller.facing(), Facing::Left);
    assert_eq!(body.acceleration().x, 0.0);
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_double_jump_then_exhausted() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    // First jump from the ground.
    update(&mut controller, &mut body, &tuning, 0.0, jump(), ContactFlags::grounded());
    assert_eq!(body.velocity().y, tuning.jump_velocity);
    assert_eq!(controller.jumps_remaining(), 1);
    body.step(DT);
    assert!(body.velocity().y < tuning.jump_velocity);

    // 10 ms later, airborne: the double jump.
    update(&mut controller, &mut body, &tuning, 0.01, jump(), airborne());
    assert_eq!(body.velocity().y, tuning.jump_velocity);
    assert_eq!(controller.jumps_remaining(), 0);
    body.step(DT);

    // Third attempt: nothing left.
    let vy = body.velocity().y;
    update(&mut controller, &mut body, &tuning, 0.02, jump(), airborne());
    assert_eq!(body.velocity().y, vy);
    assert_eq!(controller.jumps_remaining(), 0);
}

#[test]
fn test_one_press_never_jumps_twice() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(&mut controller, &mut body, &tuning, 0.0, jump(), ContactFlags::grounded());
    body.step(DT);

    // Still reported grounded on the next tick, but the buffer was consumed.
    update(
        &mut controller,
        &mut body,
        &tuning,
        DT as f64,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );

    assert_eq!(controller.jumps_remaining(), 1);
    assert!(body.velocity().y < tuning.jump_velocity);
}

#[test]
fn test_buffered_jump_fires_once_on_landing() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    body.set_velocity_y(-400.0);

    // Pressed while falling, with no coyote window open.
    update(&mut controller, &mut body, &tuning, 1.0, jump(), airborne());
    assert_eq!(body.velocity().y, -400.0);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps);

    // Lands 50 ms later, inside the buffer window.
    update(
        &mut controller,
        &mut body,
        &tuning,
        1.05,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );
    assert_eq!(body.velocity().y, tuning.jump_velocity);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps - 1);
    body.step(DT);

    // No second jump from the same press.
    update(
        &mut controller,
        &mut body,
        &tuning,
        1.05 + DT as f64,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps - 1);
    assert!(body.velocity().y < tuning.jump_velocity);
}

#[test]
fn test_stale_buffer_does_not_jump_on_landing() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    body.set_velocity_y(-400.0);

    update(&mut controller, &mut body, &tuning, 1.0, jump(), airborne());
    update(
        &mut controller,
        &mut body,
        &tuning,
        1.25,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );

    assert_eq!(body.velocity().y, -400.0);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps);
}

#[test]
fn test_coyote_jump_after_leaving_ground() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );
    // Walked off the edge 100 ms ago.
    update(&mut controller, &mut body, &tuning, 0.1, jump(), airborne());

    assert_eq!(body.velocity().y, tuning.jump_velocity);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps - 1);
}

#[test]
fn test_no_jump_after_coyote_window() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );
    body.set_velocity_y(-100.0);
    update(&mut controller, &mut body, &tuning, 0.3, jump(), airborne());

    assert_eq!(body.velocity().y, -100.0);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps);
}

#[test]
fn test_landing_restores_jumps() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(&mut controller, &mut body, &tuning, 0.0, jump(), ContactFlags::grounded());
    update(&mut controller, &mut body, &tuning, 0.2, jump(), airborne());
    assert_eq!(controller.jumps_remaining(), 0);

    update(
        &mut controller,
        &mut body,
        &tuning,
        1.0,
        PlayerIntents::default(),
        ContactFlags::grounded(),
    );

    assert_eq!(controller.jumps_remaining(), tuning.max_jumps);
    assert_eq!(controller.state().locomotion, Locomotion::Grounded);
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_is_flat_for_every_tick() {
    let tuning = PlayerTuning {
        gravity: 5000.0,
        ..Default::default()
    };
    let (mut controller, mut body) = spawn_player(&tuning);
    body.set_velocity_y(-300.0);

    update(&mut controller, &mut body, &tuning, 0.0, dash(), airborne());
    assert!(controller.is_dashing());

    let mut tick = 0;
    while controller.is_dashing() {
        assert_eq!(body.velocity().y, 0.0);
        assert_eq!(body.velocity().x, tuning.dash_speed);
        body.step(DT);
        assert_eq!(body.velocity().y, 0.0);

        tick += 1;
        let now = tick as f64 * DT as f64;
        update(
            &mut controller,
            &mut body,
            &tuning,
            now,
            PlayerIntents::default(),
            airborne(),
        );
    }

    // Gravity is back once the dash ends.
    body.step(DT);
    assert!(body.velocity().y < 0.0);
}

#[test]
fn test_dash_follows_facing_and_ignores_turns() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.0,
        hold(true, false),
        ContactFlags::grounded(),
    );
    update(&mut controller, &mut body, &tuning, 0.05, dash(), ContactFlags::grounded());
    assert_eq!(body.velocity().x, -tuning.dash_speed);

    update(
        &mut controller,
        &mut body,
        &tuning,
        0.1,
        hold(false, true),
        ContactFlags::grounded(),
    );
    assert_eq!(controller.facing(), Facing::Left);
    assert_eq!(body.velocity().x, -tuning.dash_speed);
}

#[test]
fn test_dash_respects_cooldown() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let grounded = ContactFlags::grounded();

    update(&mut controller, &mut body, &tuning, 0.0, dash(), grounded);
    update(&mut controller, &mut body, &tuning, 0.2, PlayerIntents::default(), grounded);
    assert!(!controller.is_dashing());

    update(&mut controller, &mut body, &tuning, 0.3, dash(), grounded);
    assert!(!controller.is_dashing());

    update(&mut controller, &mut body, &tuning, 0.6, dash(), grounded);
    assert!(controller.is_dashing());
}

#[test]
fn test_no_jump_while_dashing() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let grounded = ContactFlags::grounded();

    update(&mut controller, &mut body, &tuning, 0.0, dash(), grounded);
    update(&mut controller, &mut body, &tuning, 0.05, jump(), grounded);

    assert_eq!(body.velocity().y, 0.0);
    assert_eq!(controller.jumps_remaining(), tuning.max_jumps);
}

// -----------------------------------------------------------------------------
// Attack tests
// -----------------------------------------------------------------------------

#[test]
fn test_attack_emits_once_per_window() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let grounded = ContactFlags::grounded();

    let outbox = update(&mut controller, &mut body, &tuning, 0.0, attack(), grounded);
    assert_eq!(outbox.attacks_started.len(), 1);
    assert!(controller.is_attacking());
    assert_eq!(controller.state().action, PlayerAction::Attacking);

    let outbox = update(&mut controller, &mut body, &tuning, 0.1, attack(), grounded);
    assert!(outbox.attacks_started.is_empty());

    let outbox = update(&mut controller, &mut body, &tuning, 0.35, attack(), grounded);
    assert_eq!(outbox.attacks_started.len(), 1);
}

#[test]
fn test_attack_does_not_stop_movement() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let intents = PlayerIntents {
        right: true,
        attack_just_pressed: true,
        ..Default::default()
    };

    update(&mut controller, &mut body, &tuning, 0.0, intents, ContactFlags::grounded());

    assert!(controller.is_attacking());
    assert_eq!(body.acceleration().x, tuning.ground_accel);
}

#[test]
fn test_no_attack_while_dashing() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let grounded = ContactFlags::grounded();

    update(&mut controller, &mut body, &tuning, 0.0, dash(), grounded);
    let outbox = update(&mut controller, &mut body, &tuning, 0.05, attack(), grounded);

    assert!(outbox.is_empty());
    assert!(!controller.is_attacking());
}

#[test]
fn test_attack_progress_spans_window() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);

    assert_eq!(controller.attack_progress(0.0, &tuning), None);
    update(&mut controller, &mut body, &tuning, 1.0, attack(), ContactFlags::grounded());

    assert_eq!(controller.attack_progress(1.0, &tuning), Some(0.0));
    let halfway = controller.attack_progress(1.15, &tuning).unwrap();
    assert!((halfway - 0.5).abs() < 1e-3);
}

// -----------------------------------------------------------------------------
// Damage tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_knocks_away_from_source_and_grants_invincibility() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let mut health = Health::new(tuning.max_health);

    let outcome = controller.take_hit(1, Some(150.0), 0.0, &mut health, &mut body, &tuning);

    assert_eq!(outcome, HitOutcome::Hurt);
    assert_eq!(health.current, 4);
    assert_eq!(body.velocity(), Vec2::new(-tuning.knockback.x, tuning.knockback.y));
    assert!(controller.is_invincible(0.5));
    assert!(controller.is_knocked_back(0.1, &tuning));

    let outcome = controller.take_hit(1, Some(150.0), 0.5, &mut health, &mut body, &tuning);
    assert_eq!(outcome, HitOutcome::Ignored);
    assert_eq!(health.current, 4);

    assert!(!controller.is_invincible(1.0));
}

#[test]
fn test_hit_without_source_uses_inverse_facing() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let mut health = Health::new(tuning.max_health);

    controller.take_hit(1, None, 0.0, &mut health, &mut body, &tuning);
    assert!(body.velocity().x < 0.0);

    let mut health = Health::new(tuning.max_health);
    let (mut controller, mut body) = spawn_player(&tuning);
    controller.take_hit(1, Some(f32::NAN), 0.0, &mut health, &mut body, &tuning);
    assert!(body.velocity().x < 0.0);
}

#[test]
fn test_knockback_window_suspends_movement_control() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let mut health = Health::new(tuning.max_health);

    controller.take_hit(1, Some(150.0), 0.0, &mut health, &mut body, &tuning);
    update(
        &mut controller,
        &mut body,
        &tuning,
        0.1,
        hold(false, true),
        ContactFlags::grounded(),
    );

    assert_eq!(body.acceleration().x, 0.0);
    assert_eq!(body.velocity().x, -tuning.knockback.x);
}

#[test]
fn test_lethal_hit_kills_once_and_stops_input() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let mut health = Health::new(tuning.max_health);

    let outcome = controller.take_hit(99, Some(150.0), 0.0, &mut health, &mut body, &tuning);
    assert_eq!(outcome, HitOutcome::Killed);
    assert_eq!(health.current, 0);
    assert!(controller.is_dead());
    assert_eq!(controller.state().action, PlayerAction::Dead);

    let outcome = controller.take_hit(1, Some(150.0), 5.0, &mut health, &mut body, &tuning);
    assert_eq!(outcome, HitOutcome::Ignored);

    let grounded = ContactFlags::grounded();
    let outbox = update(&mut controller, &mut body, &tuning, 5.0, attack(), grounded);
    assert!(outbox.is_empty());
    assert_eq!(body.acceleration().x, 0.0);
}

#[test]
fn test_god_mode_ignores_hits() {
    let tuning = PlayerTuning::default();
    let (mut controller, mut body) = spawn_player(&tuning);
    let mut health = Health::new(tuning.max_health);
    controller.god_mode = true;

    let outcome = controller.take_hit(3, Some(150.0), 0.0, &mut health, &mut body, &tuning);

    assert_eq!(outcome, HitOutcome::Ignored);
    assert_eq!(health.current, tuning.max_health);
}
