//! SQLite-backed plan store.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use log::{debug, warn};

use super::PlanStore;
use crate::{
    db::Database,
    error::{MasonError, Result},
    models::{Plan, PlanRecord},
};

/// Plan store keeping one JSON record per context in a SQLite database.
pub struct SqlitePlanStore {
    db: Database,
    path: PathBuf,
    context: String,
}

impl SqlitePlanStore {
    /// Opens (creating if needed) the database at `path` for `context`.
    pub fn open<P: AsRef<Path>>(path: P, context: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| MasonError::file_system(parent, e))?;
        }

        let context = context.into();
        if context.trim().is_empty() {
            return Err(MasonError::invalid_input("context").with_reason("must not be empty"));
        }

        Ok(Self {
            db: Database::new(&path)?,
            path,
            context,
        })
    }

    /// The managed context this store reads and writes.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored plan, surfacing storage and parse errors instead of
    /// falling back to the default. `Ok(None)` means nothing was stored yet.
    pub fn try_load(&self) -> Result<Option<Plan>> {
        match self.db.get_record(&self.context)? {
            Some(stored) => {
                let record: PlanRecord = serde_json::from_str(&stored.payload)?;
                Ok(Some(Plan::from(record)))
            }
            None => Ok(None),
        }
    }

    /// When the plan was last saved.
    pub fn last_saved(&self) -> Result<Option<Timestamp>> {
        Ok(self
            .db
            .get_record(&self.context)?
            .map(|stored| stored.updated_at))
    }

    /// Contexts that have a stored plan in this database.
    pub fn contexts(&self) -> Result<Vec<String>> {
        self.db.list_contexts()
    }
}

impl PlanStore for SqlitePlanStore {
    fn load(&self) -> Plan {
        match self.try_load() {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                debug!("No plan stored for context '{}', using defaults", self.context);
                Plan::default()
            }
            Err(e) => {
                warn!(
                    "Could not load plan for context '{}', using defaults: {e}",
                    self.context
                );
                Plan::default()
            }
        }
    }

    fn save(&mut self, plan: &Plan) -> Result<()> {
        let payload = serde_json::to_string(&PlanRecord::from(plan))?;
        self.db.put_record(&self.context, &payload, Timestamp::now())?;
        debug!(
            "Saved plan for context '{}' ({} goals)",
            self.context,
            plan.goals.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::Goal;

    #[test]
    fn test_load_without_record_is_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqlitePlanStore::open(temp_dir.path().join("mason.db"), "village-1").unwrap();

        assert_eq!(store.load(), Plan::default());
        assert!(store.try_load().unwrap().is_none());
        assert!(store.last_saved().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store =
            SqlitePlanStore::open(temp_dir.path().join("mason.db"), "village-1").unwrap();

        let mut plan = Plan::default();
        plan.push_goal(Goal::new("wood_pit", 5));
        plan.options.long_build_threshold_hours = 3.5;
        store.save(&plan).unwrap();

        assert_eq!(store.load(), plan);
        assert!(store.last_saved().unwrap().is_some());
    }

    #[test]
    fn test_corrupt_record_loads_default() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("mason.db");
        let store = SqlitePlanStore::open(&path, "village-1").unwrap();

        Database::new(&path)
            .unwrap()
            .put_record("village-1", "{not json", Timestamp::now())
            .unwrap();

        assert!(store.try_load().is_err());
        assert_eq!(store.load(), Plan::default());
    }

    #[test]
    fn test_contexts_are_isolated() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("mason.db");
        let mut first = SqlitePlanStore::open(&path, "village-1").unwrap();
        let second = SqlitePlanStore::open(&path, "village-2").unwrap();

        let mut plan = Plan::default();
        plan.push_goal(Goal::new("main", 10));
        first.save(&plan).unwrap();

        assert_eq!(second.load(), Plan::default());
        assert_eq!(second.contexts().unwrap(), vec!["village-1"]);
    }

    #[test]
    fn test_empty_context_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = SqlitePlanStore::open(temp_dir.path().join("mason.db"), "  ");
        assert!(matches!(result, Err(MasonError::InvalidInput { .. })));
    }
}
