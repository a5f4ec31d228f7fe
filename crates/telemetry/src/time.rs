// Path: crates/telemetry/src/time.rs
use std::time::{Duration, Instant};

/// Logs the elapsed time of a scope at `debug` level when dropped.
///
/// Events go to target `timing` with the timer's `label` attached.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Starts timing.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "timing",
            label = self.label,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "Scope finished"
        );
    }
}
