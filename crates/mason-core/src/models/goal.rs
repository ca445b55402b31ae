//! Goal model definition.

use serde::{Deserialize, Serialize};

/// One `(building, target level)` pair in the build sequence.
///
/// Goals are not unique: the same building may appear several times for
/// staged upgrades. Serialized with the field names of the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Identifier of the building to upgrade (e.g. `wood_pit`)
    pub building: String,

    /// Level at which the goal is satisfied
    pub target_level: u32,
}

impl Goal {
    /// Creates a new goal.
    pub fn new(building: impl Into<String>, target_level: u32) -> Self {
        Self {
            building: building.into(),
            target_level,
        }
    }

    /// Whether an observed level satisfies this goal.
    pub fn is_satisfied_by(&self, level: u32) -> bool {
        level >= self.target_level
    }
}
