//! Option operations for the PlanEditor.

use super::PlanEditor;
use crate::{error::Result, models::BuildOptions, params::SetLongBuild};

impl PlanEditor {
    /// Switches between the discounted and the standard ordering pathway.
    pub async fn set_discount(&self, enabled: bool) -> Result<BuildOptions> {
        self.update(move |plan| {
            plan.options.use_discount = enabled;
            Ok(plan.options)
        })
        .await
    }

    /// Changes the long-build reduction flag and threshold.
    ///
    /// # Errors
    ///
    /// * `MasonError::InvalidInput` - threshold not finite or below 0.5 hours
    pub async fn set_long_build(&self, params: &SetLongBuild) -> Result<BuildOptions> {
        params.validate()?;
        let SetLongBuild {
            enabled,
            threshold_hours,
        } = *params;

        self.update(move |plan| {
            if let Some(enabled) = enabled {
                plan.options.use_long_build_reduction = enabled;
            }
            if let Some(hours) = threshold_hours {
                plan.options.long_build_threshold_hours = hours;
            }
            Ok(plan.options)
        })
        .await
    }
}
