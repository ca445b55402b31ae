//! Durable plan storage.
//!
//! A [`PlanStore`] holds the plan of one managed context. Loading never
//! fails: absent, unreadable or corrupt storage yields [`Plan::default`].
//! Saving is best-effort from the scheduler's point of view; it reports the
//! failure and the scheduler logs it without abandoning the tick.

use crate::{error::Result, models::Plan};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPlanStore;
pub use sqlite::SqlitePlanStore;

/// Context used when none is configured.
pub const DEFAULT_CONTEXT: &str = "default";

/// Storage of the plan for one managed context.
pub trait PlanStore {
    /// Loads the stored plan, or the default plan if there is none or it
    /// cannot be read.
    fn load(&self) -> Plan;

    /// Persists the plan, replacing what was stored.
    fn save(&mut self, plan: &Plan) -> Result<()>;
}

impl<S: PlanStore + ?Sized> PlanStore for Box<S> {
    fn load(&self) -> Plan {
        (**self).load()
    }

    fn save(&mut self, plan: &Plan) -> Result<()> {
        (**self).save(plan)
    }
}
