//! Combat domain: enemy AI and the death sequence.

pub(crate) mod death;
pub(crate) mod enemy;

pub use enemy::{EnemyController, EnemyState};

pub(crate) use enemy::update_enemies;
