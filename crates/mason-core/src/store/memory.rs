//! In-memory plan store.

use std::io;

use super::PlanStore;
use crate::{
    error::{MasonError, Result},
    models::Plan,
};

/// Plan store that keeps the plan in memory.
///
/// Useful for embedding the scheduler where the host persists state itself,
/// and for tests. Saves can be made to fail to exercise the scheduler's
/// persistence-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlanStore {
    plan: Option<Plan>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryPlanStore {
    /// A store that already holds `plan`.
    pub fn with_plan(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail (or succeed again).
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// The stored plan, if any was ever stored.
    pub fn stored(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }
}

impl PlanStore for MemoryPlanStore {
    fn load(&self) -> Plan {
        self.plan.clone().unwrap_or_default()
    }

    fn save(&mut self, plan: &Plan) -> Result<()> {
        if self.fail_saves {
            return Err(MasonError::file_system(
                "memory",
                io::Error::new(io::ErrorKind::Other, "saves disabled"),
            ));
        }
        self.plan = Some(plan.clone());
        self.saves += 1;
        Ok(())
    }
}
