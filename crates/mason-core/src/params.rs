//! Parameter structures for plan editing operations.
//!
//! These are the core, framework-free inputs of the [`PlanEditor`]. Interface
//! layers wrap them with their own derives (clap `Args` in the CLI) and
//! convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │    CLI Args     │    │   Core Params   │
//! │ (clap derives)  │───▶│ (serde derives) │───▶ PlanEditor
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! Positions are 1-based throughout, matching the numbering shown to users.
//!
//! [`PlanEditor`]: crate::editor::PlanEditor

use serde::{Deserialize, Serialize};

use crate::{
    error::{MasonError, Result},
    models::{Goal, MoveDirection, MIN_LONG_BUILD_THRESHOLD_HOURS},
    world::EntityListing,
};

/// Parameters for operations addressing a single goal by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    /// 1-based position in the build sequence
    pub position: usize,
}

/// Parameters for appending a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGoal {
    /// Building identifier
    pub building: String,
    /// Level to reach
    pub target_level: u32,
    /// The building's level as listed on the page, when known. Goals at or
    /// below it are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_level: Option<u32>,
}

impl AddGoal {
    /// Checks the goal against the known current level and builds it.
    ///
    /// # Errors
    ///
    /// * `MasonError::InvalidInput` - empty building, zero target level, or a
    ///   target level not above the current level
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mason_core::params::AddGoal;
    ///
    /// let params = AddGoal {
    ///     building: "wood_pit".to_string(),
    ///     target_level: 5,
    ///     current_level: Some(5),
    /// };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<Goal> {
        let goal = validate_goal(&self.building, self.target_level)?;
        if let Some(current) = self.current_level {
            if self.target_level <= current {
                return Err(MasonError::invalid_input("target_level").with_reason(format!(
                    "Target level {} must be above the current level {current}",
                    self.target_level
                )));
            }
        }
        Ok(goal)
    }

    /// Takes the current level from the building's page listing.
    ///
    /// # Errors
    ///
    /// * `MasonError::InvalidInput` - the building is not among the
    ///   upgradable buildings on the page
    pub fn with_listing(mut self, entities: &[EntityListing]) -> Result<Self> {
        let building = self.building.trim();
        let listing = entities
            .iter()
            .find(|entity| entity.id == building)
            .ok_or_else(|| {
                MasonError::invalid_input("building").with_reason(format!(
                    "Building '{building}' is not an upgradable building on the page"
                ))
            })?;
        self.current_level = Some(listing.current_level());
        Ok(self)
    }
}

/// Parameters for inserting a goal at a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertGoal {
    #[serde(flatten)]
    pub goal: AddGoal,
    /// 1-based position; one past the end appends
    pub position: usize,
}

/// Parameters for swapping two goals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapGoals {
    pub first: usize,
    pub second: usize,
}

/// Parameters for moving a goal one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveGoal {
    pub position: usize,
    pub direction: MoveDirection,
}

/// Parameters for changing the long-build reduction settings. Fields left
/// `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetLongBuild {
    pub enabled: Option<bool>,
    /// Threshold in hours
    pub threshold_hours: Option<f64>,
}

impl SetLongBuild {
    /// Rejects thresholds that are not finite or below the minimum.
    pub fn validate(&self) -> Result<()> {
        match self.threshold_hours {
            Some(hours) if !hours.is_finite() || hours < MIN_LONG_BUILD_THRESHOLD_HOURS => {
                Err(MasonError::invalid_input("threshold_hours").with_reason(format!(
                    "Threshold must be a number of at least {MIN_LONG_BUILD_THRESHOLD_HOURS} hours, got {hours}"
                )))
            }
            _ => Ok(()),
        }
    }
}

fn validate_goal(building: &str, target_level: u32) -> Result<Goal> {
    let building = building.trim();
    if building.is_empty() {
        return Err(MasonError::invalid_input("building").with_reason("must not be empty"));
    }
    if target_level == 0 {
        return Err(MasonError::invalid_input("target_level").with_reason("must be positive"));
    }
    Ok(Goal::new(building, target_level))
}
