//! The boundary between the scheduler and the game.
//!
//! The scheduler never touches page markup. It reads the world through a
//! [`WorldSensor`] and acts on it through an [`ActionActuator`]; a
//! [`WorldSource`] produces a freshly observed world for every tick, which
//! is the only way state reaches the scheduler.
//!
//! [`SnapshotWorld`] implements both traits over a [`PageSnapshot`], the
//! serialised form of the construction screen that a host extracts from the
//! rendered page. [`SnapshotFile`] re-reads such a snapshot from disk for
//! every tick.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{Level, SlotObservation, SlotPosition},
};

pub mod page;
pub mod snapshot;
pub mod source;

#[cfg(test)]
mod tests;

pub use page::{PageAction, SnapshotWorld};
pub use snapshot::{
    parse_clock, BuildingRow, EntityListing, OrderControl, PageSnapshot, QueueEntry,
    ReductionControl,
};
pub use source::{SnapshotFile, WorldSource};

/// Read-only queries against the world.
///
/// Every method is free of side effects and may be called any number of
/// times within a tick.
#[cfg_attr(test, mockall::automock)]
pub trait WorldSensor {
    /// Current level of a building; [`Level::Unknown`] when it cannot be
    /// located.
    fn current_level(&self, building: &str) -> Result<Level>;

    /// Remaining time of the building's in-progress order;
    /// [`NEVER`](crate::models::NEVER) when nothing is running or the
    /// building cannot be located.
    fn remaining_action_time(&self, building: &str) -> Result<Duration>;

    /// Whether an order through the given pathway can be issued right now:
    /// a valid order link exists, it belongs to the requested pathway and its
    /// control is not disabled.
    fn can_order(&self, building: &str, discounted: bool) -> Result<bool>;

    /// Whether a top-level construction order is outstanding. While it is,
    /// no new order may be issued.
    fn has_active_construction(&self) -> Result<bool>;

    /// Occupied in-progress slots, soonest to finish first.
    fn active_slots(&self) -> Result<Vec<SlotObservation>>;
}

/// What a time reduction is applied to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReductionTarget {
    /// Whichever order was queued most recently. Used right after issuing an
    /// order; assumes the newest reduction control belongs to that order.
    Latest,
    /// The in-progress order in a specific slot, using the non-instant
    /// reduction control.
    Slot(SlotPosition),
}

impl fmt::Display for ReductionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReductionTarget::Latest => write!(f, "latest order"),
            ReductionTarget::Slot(position) => write!(f, "slot {position}"),
        }
    }
}

/// Write operations against the world.
///
/// Effects are asynchronous: an issued order is not observable until a
/// later tick, so callers must not retry blindly.
#[cfg_attr(test, mockall::automock)]
pub trait ActionActuator {
    /// Issues an upgrade order. Returns `false`, with no side effect, if no
    /// valid order control exists for the pathway.
    fn order(&mut self, building: &str, discounted: bool) -> Result<bool>;

    /// Applies a time reduction. Returns `false` if no eligible reduction
    /// control exists for the target.
    fn apply_time_reduction(&mut self, target: ReductionTarget) -> Result<bool>;
}
