//! Frame timing

use std::time::{Duration, Instant};

/// Wall-clock start, elapsed time and the last simulation step
#[derive(Debug, Clone)]
pub struct Time {
    /// When the game was created
    pub started: Instant,
    /// Elapsed since `started`, as of the last update
    pub since_start: Duration,
    /// Wall clock at the last update
    pub now: Instant,
    /// Last frame's step in seconds
    pub delta: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self {
            started,
            since_start: Duration::ZERO,
            now: started,
            delta: 0.0,
        }
    }

    /// Record a frame of `delta_ms` milliseconds
    pub fn update(&mut self, delta_ms: f64) {
        self.update_at(delta_ms, Instant::now());
    }

    /// Record a frame of `delta_ms` milliseconds observed at `now`
    pub fn update_at(&mut self, delta_ms: f64, now: Instant) {
        self.now = now;
        self.since_start = now.saturating_duration_since(self.started);
        self.delta = (delta_ms / 1000.0) as f32;
    }
}
