//! Display formatting for plans, tick reports and page listings.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results get newtype wrappers so the same data
//! can be framed differently per context. Everything renders as markdown for
//! the terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Plan, Report)  │───▶│ (Entities, ...) │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Entities, PageActions, Contexts)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use mason_core::{
//!     display::{CreateResult, OperationStatus},
//!     models::Goal,
//! };
//!
//! let result = CreateResult::new((2, Goal::new("wood_pit", 5)));
//! assert!(format!("{result}").contains("position 2"));
//!
//! let status = OperationStatus::success("Build sequence cleared".to_string());
//! assert!(format!("{status}").starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{Contexts, Entities, PageActions};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
