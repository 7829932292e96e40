//! Engine configuration

use chrono_tz::Tz;
use std::time::Duration;

/// Default debounce window between a local mutation and the
/// outbound sync it schedules.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tunables for one order session
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Debounce window coalescing bursts of local edits into one
    /// outbound sync. Restarted, not layered, on each new mutation.
    pub debounce: Duration,
    /// Business time zone for weekday/time promotion conditions
    pub tz: Tz,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            tz: chrono_tz::America::Bogota,
        }
    }
}
