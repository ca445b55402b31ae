//! Result wrapper types for displaying editing outcomes.

use std::fmt;

use crate::models::{BuildOptions, Goal};

/// Wrapper type for displaying an added goal with its 1-based position.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<(usize, Goal)> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (position, goal) = &self.resource;
        writeln!(f, "Added {goal} at position {position}")
    }
}

/// Wrapper type for displaying changed options together with what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<BuildOptions> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated options")?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a removed goal.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Goal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Removed {}", self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            BuildOptions::default(),
            vec!["Discounted orders turned on".to_string()],
        );
        let output = result.to_string();
        assert!(output.contains("Changes made:\n- Discounted orders turned on"));
        assert!(output.contains("- Discounted orders: on"));
    }

    #[test]
    fn test_delete_result_display() {
        let result = DeleteResult::new(Goal::new("farm", 4));
        assert_eq!(result.to_string(), "Removed **farm** to level 4\n");
    }
}
