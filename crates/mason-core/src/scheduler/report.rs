//! Structured record of what a tick observed and did.

use jiff::Timestamp;
use serde::Serialize;

use crate::models::{EntityObservation, Goal, SlotPosition};

/// Whether the tick wrote the plan back to storage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// The plan was not mutated
    Unchanged,
    /// The mutated plan was saved
    Saved,
    /// The mutated plan could not be saved; the decision still stands
    Failed,
}

/// How the goal half of a tick ended.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// A construction order is outstanding; nothing else was considered
    Throttled,
    /// The build sequence is empty
    Idle,
    /// The active goal's building could not be located
    LevelUnknown { goal: Goal },
    /// The active goal was met and removed
    Retired { goal: Goal, level: u32 },
    /// The active goal cannot be ordered right now
    Waiting {
        goal: Goal,
        observation: EntityObservation,
    },
    /// An order was issued for the active goal
    Ordered {
        goal: Goal,
        discounted: bool,
        /// The follow-up time reduction on the new order was applied
        time_reduced: bool,
        observation: EntityObservation,
    },
    /// The order control was there when checked but the order did not go
    /// through
    Rejected { goal: Goal },
}

/// Everything one tick did.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TickReport {
    pub started_at: Timestamp,
    /// Slot that received the long-build reduction, if any
    pub long_build_reduction: Option<SlotPosition>,
    pub outcome: TickOutcome,
    pub persistence: Persistence,
    /// The active goal's building has an order finishing within the
    /// scheduler's look-ahead window
    pub finishing_soon: bool,
}

impl TickReport {
    /// Whether an order was issued this tick.
    pub fn issued_order(&self) -> bool {
        matches!(self.outcome, TickOutcome::Ordered { .. })
    }

    /// Whether a goal was retired this tick.
    pub fn retired_goal(&self) -> bool {
        matches!(self.outcome, TickOutcome::Retired { .. })
    }

    /// Number of page-changing actions the tick performed.
    pub fn action_count(&self) -> usize {
        let reduction = usize::from(self.long_build_reduction.is_some());
        let order = match &self.outcome {
            TickOutcome::Ordered { time_reduced, .. } => 1 + usize::from(*time_reduced),
            _ => 0,
        };
        reduction + order
    }
}
