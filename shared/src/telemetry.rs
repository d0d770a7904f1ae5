use colored::Colorize;
use std::time::{Duration, Instant};

/// Set to `1` (or any non-empty value other than `0`) to silence progress lines.
pub const QUIET_ENV: &str = "RAGUARD_QUIET";

pub struct Telemetry {
    start: Instant,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Report that a pipeline stage finished, with its wall time.
    pub fn finish(&self, stage: &str) {
        progress(&format!("{} in {}", stage, format_elapsed(self.elapsed())));
    }
}

pub fn progress(message: &str) {
    if quiet() {
        return;
    }
    eprintln!("{} {}", "::".dimmed(), message);
}

fn quiet() -> bool {
    std::env::var(QUIET_ENV)
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}

pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}
