//! Combat domain: components shared by every damageable actor.

use bevy::prelude::*;

/// Health component for damageable entities. `current` never exceeds `max`
/// and never underflows.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

#[derive(Component, Debug)]
pub struct Enemy;

/// Stable roster index of an enemy, allocated at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

impl EnemyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of a hit aimed at an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Dead, invincible, or otherwise immune.
    Ignored,
    Hurt,
    Killed,
}
