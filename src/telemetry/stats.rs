//! Tick-rate metering and the read-only telemetry snapshot.

use std::time::Instant;

use crate::simulation::params::Parameters;

/// Smoothing factor for the tick-rate EMA; small keeps the display calm.
const EMA_ALPHA: f64 = 0.1;

/// Measures the instantaneous tick rate from wall-clock gaps between
/// `tick()` calls and smooths it with an EMA.
#[derive(Debug)]
pub struct TickMeter {
    last: Option<Instant>,
    smoothed: f64,
}

impl TickMeter {
    pub fn new() -> Self {
        Self {
            last: None,
            smoothed: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(prev) = self.last {
            let dt = now.duration_since(prev).as_secs_f64();
            if dt > 0.0 {
                let instant_rate = 1.0 / dt;
                self.smoothed = if self.smoothed == 0.0 {
                    instant_rate
                } else {
                    (1.0 - EMA_ALPHA) * self.smoothed + EMA_ALPHA * instant_rate
                };
            }
        }
        self.last = Some(now);
    }

    /// Smoothed ticks per second; 0.0 until two ticks have happened.
    pub fn rate(&self) -> f64 {
        self.smoothed
    }
}

impl Default for TickMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Display-only snapshot of the simulation state.
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub particles: usize,
    pub bodies: usize,
    pub emitters: usize,
    pub ticks_per_sec: f64,
    pub params: Parameters,
}
