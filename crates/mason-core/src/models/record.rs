//! The persisted plan record.
//!
//! This is the on-disk schema, one record per managed context:
//!
//! ```json
//! {
//!   "useCostReduction": true,
//!   "useLongBuildReduction": true,
//!   "longBuildThreshold": 2,
//!   "buildSequence": [{ "building": "wood_pit", "targetLevel": 5 }]
//! }
//! ```
//!
//! Reading is lenient: every field may be missing, and entries that cannot
//! form a valid goal are dropped rather than failing the whole record.

use log::warn;
use serde::{Deserialize, Serialize};

use super::{
    options::{DEFAULT_LONG_BUILD_THRESHOLD_HOURS, MIN_LONG_BUILD_THRESHOLD_HOURS},
    BuildOptions, Goal, Plan,
};

/// Raw sequence entry as stored; `targetLevel` is signed so that bad values
/// can be recognised and skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordGoal {
    pub building: String,
    pub target_level: i64,
}

/// Serialized form of a [`Plan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cost_reduction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_long_build_reduction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_build_threshold: Option<f64>,
    #[serde(default)]
    pub build_sequence: Vec<RecordGoal>,
}

impl From<&Plan> for PlanRecord {
    fn from(plan: &Plan) -> Self {
        PlanRecord {
            use_cost_reduction: Some(plan.options.use_discount),
            use_long_build_reduction: Some(plan.options.use_long_build_reduction),
            long_build_threshold: Some(plan.options.long_build_threshold_hours),
            build_sequence: plan
                .goals
                .iter()
                .map(|goal| RecordGoal {
                    building: goal.building.clone(),
                    target_level: i64::from(goal.target_level),
                })
                .collect(),
        }
    }
}

impl From<PlanRecord> for Plan {
    fn from(record: PlanRecord) -> Self {
        let defaults = BuildOptions::default();
        let options = BuildOptions {
            use_discount: record.use_cost_reduction.unwrap_or(defaults.use_discount),
            use_long_build_reduction: record
                .use_long_build_reduction
                .unwrap_or(defaults.use_long_build_reduction),
            long_build_threshold_hours: normalize_threshold(record.long_build_threshold),
        };

        let goals = record
            .build_sequence
            .into_iter()
            .filter_map(|entry| match u32::try_from(entry.target_level) {
                Ok(level) if level > 0 && !entry.building.is_empty() => {
                    Some(Goal::new(entry.building, level))
                }
                _ => {
                    warn!(
                        "Dropping invalid stored goal '{}' -> {}",
                        entry.building, entry.target_level
                    );
                    None
                }
            })
            .collect();

        Plan { goals, options }
    }
}

/// Missing, zero or non-finite thresholds fall back to the default; small
/// ones are raised to the minimum.
fn normalize_threshold(stored: Option<f64>) -> f64 {
    match stored {
        Some(hours) if hours.is_finite() && hours > 0.0 => {
            hours.max(MIN_LONG_BUILD_THRESHOLD_HOURS)
        }
        _ => DEFAULT_LONG_BUILD_THRESHOLD_HOURS,
    }
}
