//! User-configured scheduler options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest accepted long-build threshold, in hours.
pub const MIN_LONG_BUILD_THRESHOLD_HOURS: f64 = 0.5;

/// Threshold used when none (or a nonsensical one) is stored.
pub const DEFAULT_LONG_BUILD_THRESHOLD_HOURS: f64 = 2.0;

/// Heuristic switches stored alongside the build sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BuildOptions {
    /// Order through the discounted (cheaper) pathway and reduce the new
    /// order's build time right after issuing it
    pub use_discount: bool,

    /// Spend one time reduction per tick on an in-progress order that runs
    /// longer than the threshold
    pub use_long_build_reduction: bool,

    /// Long-build threshold in hours (never below 0.5)
    pub long_build_threshold_hours: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            use_discount: true,
            use_long_build_reduction: true,
            long_build_threshold_hours: DEFAULT_LONG_BUILD_THRESHOLD_HOURS,
        }
    }
}

impl BuildOptions {
    /// Whether a remaining build duration counts as a long build.
    ///
    /// Strictly greater than the threshold: a build of exactly two hours is
    /// not long under the default threshold.
    pub fn is_long_build(&self, remaining: Duration) -> bool {
        remaining.as_secs_f64() / 3600.0 > self.long_build_threshold_hours
    }
}
