//! Core library for the Mason construction scheduler.
//!
//! Mason works through a user-defined, ordered build sequence of
//! `(building, target level)` goals one at a time. On every tick it observes
//! the game's construction screen, retires the front goal once it is met,
//! and otherwise issues the next upgrade order, optionally spending a time
//! reduction on the new order and on any in-progress order that runs longer
//! than a threshold.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   refresh   ┌─────────────┐   sense/act   ┌───────────┐
//! │  Driver  │────────────▶│ WorldSource │──────────────▶│ Scheduler │
//! │ (timer)  │◀────────────│ (snapshot)  │◀──────────────│  (tick)   │
//! └──────────┘   settle    └─────────────┘               └─────┬─────┘
//!                                                              │ load/save
//!                          ┌─────────────┐               ┌─────▼─────┐
//!                          │ PlanEditor  │──────────────▶│ PlanStore │
//!                          │ (user edits)│               │ (SQLite)  │
//!                          └─────────────┘               └───────────┘
//! ```
//!
//! - [`scheduler`]: the per-tick decision core
//! - [`world`]: the sensor and actuator seams plus the page snapshot backend
//! - [`store`]: durable plan storage per managed context
//! - [`editor`]: asynchronous configuration surface over the store
//! - [`driver`]: repeated tick execution with outcome-dependent waits
//! - [`display`]: markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use mason_core::{
//!     models::{Goal, Plan},
//!     world::{PageSnapshot, SnapshotWorld},
//!     MemoryPlanStore, Scheduler, TickOutcome,
//! };
//!
//! let page = PageSnapshot::from_json(
//!     r#"{ "buildings": [{ "id": "wood_pit", "name": "Timber camp", "nextLevel": 6 }] }"#,
//! )?;
//!
//! let mut plan = Plan::default();
//! plan.push_goal(Goal::new("wood_pit", 5));
//! let mut scheduler = Scheduler::new(MemoryPlanStore::with_plan(plan));
//!
//! let report = scheduler.tick(&mut SnapshotWorld::new(page));
//! assert!(matches!(report.outcome, TickOutcome::Retired { level: 5, .. }));
//! # Ok::<(), mason_core::MasonError>(())
//! ```

pub mod db;
pub mod display;
pub mod driver;
pub mod editor;
pub mod error;
pub mod models;
pub mod params;
pub mod scheduler;
pub mod store;
pub mod world;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Contexts, CreateResult, DeleteResult, Entities, LocalDateTime, OperationStatus, PageActions,
    UpdateResult,
};
pub use driver::{Driver, DriverSettings, DriverSummary};
pub use editor::{PlanEditor, PlanEditorBuilder, PlanView};
pub use error::{MasonError, Result};
pub use models::{BuildOptions, Goal, MoveDirection, Plan};
pub use params::{AddGoal, InsertGoal, MoveGoal, Position, SetLongBuild, SwapGoals};
pub use scheduler::{Persistence, Scheduler, TickOutcome, TickReport};
pub use store::{MemoryPlanStore, PlanStore, SqlitePlanStore, DEFAULT_CONTEXT};
pub use world::{ActionActuator, SnapshotFile, WorldSensor, WorldSource};
