//! Per-stage wall-clock timing for network construction.
//!
//! Timers report through `tracing` at debug level; the collected durations
//! are also kept on the built network for callers that want them.

use std::time::Instant;

/// A simple timer that measures elapsed time.
pub struct StageTimer {
    label: &'static str,
    start: Instant,
}

impl StageTimer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Stop the timer, log the result and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        tracing::debug!(stage = self.label, elapsed_s = elapsed, "stage finished");
        elapsed
    }
}

/// Seconds spent in each construction stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageTimings {
    pub filter_s: f64,
    pub match_s: f64,
    pub resolve_s: f64,
    pub topology_s: f64,
}

impl StageTimings {
    pub fn total_s(&self) -> f64 {
        self.filter_s + self.match_s + self.resolve_s + self.topology_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_reports_non_negative() {
        let t = StageTimer::start("noop");
        assert!(t.stop() >= 0.0);
    }

    #[test]
    fn total_sums_stages() {
        let t = StageTimings {
            filter_s: 1.0,
            match_s: 2.0,
            resolve_s: 0.5,
            topology_s: 0.25,
        };
        assert!((t.total_s() - 3.75).abs() < 1e-12);
    }
}
