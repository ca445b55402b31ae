//! Data models for the build plan and world observations.
//!
//! This module contains the core domain models of the scheduler. Display
//! implementations live in [`crate::display::models`] to keep data and
//! presentation apart.
//!
//! - [`Plan`], [`Goal`], [`BuildOptions`]: the durable state, edited by the
//!   user and shrunk by the scheduler as goals are met
//! - [`PlanRecord`]: the persisted JSON shape of a plan
//! - [`EntityObservation`], [`SlotObservation`], [`Level`]: tick-scoped
//!   readings of the world, never persisted
//!
//! # Examples
//!
//! ```rust
//! use mason_core::models::{Goal, Plan};
//!
//! let mut plan = Plan::default();
//! plan.push_goal(Goal::new("wood_pit", 5));
//! plan.push_goal(Goal::new("clay_pit", 3));
//!
//! assert_eq!(plan.active_goal(), Some(&Goal::new("wood_pit", 5)));
//! assert!(plan.retire(&Goal::new("wood_pit", 5)));
//! assert_eq!(plan.active_goal(), Some(&Goal::new("clay_pit", 3)));
//! ```

pub mod goal;
pub mod observation;
pub mod options;
pub mod plan;
pub mod record;


pub use goal::Goal;
pub use observation::{EntityObservation, Level, SlotObservation, SlotPosition, NEVER};
pub use options::{BuildOptions, MIN_LONG_BUILD_THRESHOLD_HOURS};
pub use plan::{MoveDirection, Plan};
pub use record::PlanRecord;
