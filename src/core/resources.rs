//! Core domain: shared resources for run configuration and level flow.

use bevy::prelude::*;
use rand::Rng;
use std::num::ParseIntError;

/// Fixes the AI seed when set, so runs replay identically.
pub const SEED_ENV: &str = "EMBER_ASCENT_SEED";

#[derive(Resource, Debug)]
pub struct RunConfig {
    /// Seeds the AI rolls; fixed for the whole process.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

impl RunConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Parse a seed override; an unset value keeps the random seed.
    pub fn seed_override(raw: Option<&str>) -> Result<Option<u64>, ParseIntError> {
        raw.map(|value| value.trim().parse::<u64>()).transpose()
    }
}

/// A level restart waiting for its delay to pass.
#[derive(Resource, Debug, Default)]
pub struct PendingRestart {
    at: Option<f64>,
}

impl PendingRestart {
    /// Schedule a restart `delay` seconds from `now`. An earlier schedule wins.
    pub fn schedule(&mut self, now: f64, delay: f32) {
        if self.at.is_none() {
            self.at = Some(now + delay as f64);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.at.is_some()
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    pub fn clear(&mut self) {
        self.at = None;
    }
}
