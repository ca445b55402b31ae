//! Display implementations for domain models.
//!
//! Kept apart from the model definitions. Output is markdown.

use std::{fmt, time::Duration};

use super::datetime::LocalDateTime;
use crate::{
    editor::PlanView,
    models::{BuildOptions, EntityObservation, Goal, Plan, NEVER},
    scheduler::{Persistence, TickOutcome, TickReport},
    world::EntityListing,
};

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}** to level {}", self.building, self.target_level)
    }
}

impl fmt::Display for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Discounted orders: {}", on_off(self.use_discount))?;
        writeln!(
            f,
            "- Long-build reduction: {} (threshold {}h)",
            on_off(self.use_long_build_reduction),
            self.long_build_threshold_hours
        )
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Build sequence")?;
        writeln!(f)?;
        if self.goals.is_empty() {
            writeln!(f, "No goals in the build sequence.")?;
        } else {
            for (index, goal) in self.goals.iter().enumerate() {
                let marker = if index == 0 { " (active)" } else { "" };
                writeln!(f, "{}. {goal}{marker}", index + 1)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "## Options")?;
        writeln!(f)?;
        write!(f, "{}", self.options)
    }
}

impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan for {}", self.context)?;
        writeln!(f)?;
        match &self.updated_at {
            Some(updated_at) => writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?,
            None => writeln!(f, "- Not saved yet")?,
        }
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

impl fmt::Display for EntityListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** `{}`: {}",
            self.display_name, self.id, self.current_level_label
        )
    }
}

impl fmt::Display for EntityObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Level: {}", self.current_level)?;
        writeln!(f, "- Running order: {}", Remaining(self.remaining))?;
        writeln!(
            f,
            "- Orderable: discounted {}, standard {}",
            yes_no(self.can_order_discounted),
            yes_no(self.can_order_standard)
        )
    }
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Throttled => write!(f, "Construction in progress, no order issued"),
            Self::Idle => write!(f, "Build sequence is empty"),
            Self::LevelUnknown { goal } => {
                write!(f, "Level of {goal} is unknown, nothing done")
            }
            Self::Retired { goal, level } => {
                write!(f, "Goal {goal} reached (level {level}) and retired")
            }
            Self::Waiting { goal, .. } => write!(f, "Waiting to order {goal}"),
            Self::Ordered {
                goal,
                discounted,
                time_reduced,
                ..
            } => {
                write!(
                    f,
                    "Ordered {goal} ({})",
                    if *discounted { "discounted" } else { "standard" }
                )?;
                if *time_reduced {
                    write!(f, " and reduced its build time")?;
                }
                Ok(())
            }
            Self::Rejected { goal } => write!(f, "Order for {goal} did not go through"),
        }
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Tick at {}", LocalDateTime(&self.started_at))?;
        writeln!(f)?;
        writeln!(f, "{}", self.outcome)?;
        writeln!(f)?;

        if let Some(slot) = self.long_build_reduction {
            writeln!(f, "- Long build in slot {slot} reduced")?;
        }
        match self.persistence {
            Persistence::Unchanged => {}
            Persistence::Saved => writeln!(f, "- Plan saved")?,
            Persistence::Failed => writeln!(f, "- **Plan could not be saved**")?,
        }
        if self.finishing_soon {
            writeln!(f, "- Current order finishes soon")?;
        }

        if let TickOutcome::Waiting { observation, .. } | TickOutcome::Ordered { observation, .. } =
            &self.outcome
        {
            writeln!(f)?;
            writeln!(f, "## {}", observation.building)?;
            writeln!(f)?;
            write!(f, "{observation}")?;
        }
        Ok(())
    }
}

/// Remaining build time as `H:MM:SS`, or "none" when nothing runs.
struct Remaining(Duration);

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == NEVER {
            return write!(f, "none");
        }
        let secs = self.0.as_secs();
        write!(f, "{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
