//! Debug domain: state for the dev tools.

use bevy::prelude::*;

/// How often state logging prints, in seconds.
pub const STATE_LOG_INTERVAL: f32 = 0.5;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether player and enemy state is logged periodically
    pub log_state: bool,
    /// Whether player ignores all damage
    pub god_mode: bool,
    /// Seconds until the next state log line
    pub log_timer: f32,
}

impl DebugState {
    /// Advance the log timer; true when a line is due.
    pub fn tick_log(&mut self, dt: f32) -> bool {
        if !self.log_state {
            return false;
        }
        self.log_timer -= dt;
        if self.log_timer <= 0.0 {
            self.log_timer = STATE_LOG_INTERVAL;
            return true;
        }
        false
    }
}
