//! Tick-scoped observations of the external world.
//!
//! Nothing in this module is persisted. Observations are produced fresh on
//! every tick and dropped at its end, because the world can change between
//! ticks without the scheduler's involvement.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Sentinel for "no action in progress, or the entity could not be located".
///
/// Treated as "never arrives soon", not as an error.
pub const NEVER: Duration = Duration::MAX;

/// Observed level of a building.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "state", content = "level")]
pub enum Level {
    /// The building was located and its level read
    Known(u32),
    /// The building could not be located (delisted, render gap, ...)
    Unknown,
}

impl Level {
    /// The level, if known.
    pub fn known(self) -> Option<u32> {
        match self {
            Level::Known(level) => Some(level),
            Level::Unknown => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Known(level) => write!(f, "{level}"),
            Level::Unknown => write!(f, "unknown"),
        }
    }
}

/// One of the world's concurrent in-progress order slots.
///
/// The world exposes two slots, ordered by finish time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum SlotPosition {
    /// Finishes soonest
    First,
    /// Finishes next
    Second,
}

impl SlotPosition {
    /// 1-based position number.
    pub fn number(self) -> u8 {
        match self {
            SlotPosition::First => 1,
            SlotPosition::Second => 2,
        }
    }
}

impl TryFrom<u8> for SlotPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SlotPosition::First),
            2 => Ok(SlotPosition::Second),
            other => Err(format!("Slot position {other} is outside the two tracked slots")),
        }
    }
}

impl From<SlotPosition> for u8 {
    fn from(value: SlotPosition) -> Self {
        value.number()
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An occupied in-progress order slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotObservation {
    pub position: SlotPosition,
    pub building: String,
    pub remaining: Duration,
}

/// Everything the scheduler reads about the active goal's building in one
/// tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityObservation {
    pub building: String,
    pub current_level: Level,
    /// Remaining time of the building's in-progress order, [`NEVER`] if none
    pub remaining: Duration,
    pub can_order_discounted: bool,
    pub can_order_standard: bool,
}

impl EntityObservation {
    /// Whether the requested ordering pathway is open.
    pub fn can_order(&self, discounted: bool) -> bool {
        if discounted {
            self.can_order_discounted
        } else {
            self.can_order_standard
        }
    }

    /// Whether an in-progress order for this building finishes within
    /// `window`. A zero remaining time means "nothing running".
    pub fn finishes_within(&self, window: Duration) -> bool {
        !self.remaining.is_zero() && self.remaining <= window
    }
}
