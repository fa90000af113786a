//! Wall-Clock Timing

use std::io::Write;
use std::time::{Duration, Instant};

/// Timer for one benchmark iteration
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since `start`
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Run `action` back-to-back `iterations` times and return the arithmetic
/// mean of the per-iteration durations, in milliseconds.
///
/// `iterations` is clamped to at least one.
pub fn mean_millis<F: FnMut()>(iterations: u32, mut action: F) -> f64 {
    let iterations = iterations.max(1);
    let mut total_ms = 0.0;

    for _ in 0..iterations {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();

        let timer = Timer::start();
        action();
        total_ms += timer.stop().as_secs_f64() * 1_000.0;
    }

    total_ms / f64::from(iterations)
}
