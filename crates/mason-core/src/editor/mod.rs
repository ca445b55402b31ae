//! Asynchronous editing of stored plans.
//!
//! The [`PlanEditor`] is the configuration surface of the scheduler: it
//! appends, inserts, removes and reorders goals and toggles the heuristic
//! options of one managed context. Every operation is a read-modify-write of
//! the context's record, run on the blocking thread pool:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   PlanEditor    │    │ SqlitePlanStore │    │    Database     │
//! │ (goal_ops,      │───▶│ load ─▶ edit ─▶ │───▶│  (via db/)      │
//! │  option_ops)    │    │ save            │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The scheduler reloads the plan at the start of every tick, so edits made
//! here take effect on the next tick without further coordination.
//!
//! # Examples
//!
//! ```rust
//! use mason_core::{params::AddGoal, PlanEditorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let editor = PlanEditorBuilder::new()
//!     .with_database_path(Some("mason.db"))
//!     .with_context("village-1")
//!     .build()
//!     .await?;
//!
//! editor
//!     .add_goal(&AddGoal {
//!         building: "wood_pit".to_string(),
//!         target_level: 5,
//!         current_level: Some(3),
//!     })
//!     .await?;
//!
//! let view = editor.show_plan().await?;
//! println!("{view}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::Serialize;
use tokio::task;

use crate::{
    error::{MasonError, Result},
    models::Plan,
    store::{PlanStore, SqlitePlanStore},
};

pub mod builder;
pub mod goal_ops;
pub mod option_ops;


pub use builder::PlanEditorBuilder;

/// A stored plan together with where and when it was stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanView {
    pub context: String,
    pub plan: Plan,
    /// `None` when nothing was saved for the context yet
    pub updated_at: Option<Timestamp>,
}

/// Editing interface over the plan of one managed context.
#[derive(Debug, Clone)]
pub struct PlanEditor {
    pub(crate) db_path: PathBuf,
    pub(crate) context: String,
}

impl PlanEditor {
    /// Creates an editor for `context` in the database at `db_path`.
    pub(crate) fn new(db_path: PathBuf, context: String) -> Self {
        Self { db_path, context }
    }

    /// The managed context being edited.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Path of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Opens a store on the same context, for handing to a scheduler.
    pub fn open_store(&self) -> Result<SqlitePlanStore> {
        SqlitePlanStore::open(&self.db_path, self.context.clone())
    }

    /// Shows the stored plan. A context without a record shows the default
    /// plan; an unreadable record is an error.
    pub async fn show_plan(&self) -> Result<PlanView> {
        self.read(|store| {
            Ok(PlanView {
                context: store.context().to_string(),
                plan: store.try_load()?.unwrap_or_default(),
                updated_at: store.last_saved()?,
            })
        })
        .await
    }

    /// Lists every context with a stored plan in the database.
    pub async fn list_contexts(&self) -> Result<Vec<String>> {
        self.read(SqlitePlanStore::contexts).await
    }

    async fn read<T, F>(&self, query: F) -> Result<T>
    where
        F: FnOnce(&SqlitePlanStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let context = self.context.clone();

        task::spawn_blocking(move || {
            let store = SqlitePlanStore::open(&db_path, context)?;
            query(&store)
        })
        .await
        .map_err(MasonError::join)?
    }

    /// Loads the plan, applies `edit` and saves the result. Nothing is saved
    /// when the stored record cannot be read or `edit` fails.
    pub(crate) async fn update<T, F>(&self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Plan) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let context = self.context.clone();

        task::spawn_blocking(move || {
            let mut store = SqlitePlanStore::open(&db_path, context)?;
            let mut plan = store.try_load()?.unwrap_or_default();
            let value = edit(&mut plan)?;
            store.save(&plan)?;
            Ok(value)
        })
        .await
        .map_err(MasonError::join)?
    }
}
