//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::detect_contacts;
pub(crate) use input::read_input;
pub(crate) use movement::{integrate_bodies, sync_bodies_from_physics, update_player};
