//! Plan model definition and sequence editing.

use serde::{Deserialize, Serialize};

use super::{BuildOptions, Goal};
use crate::error::{MasonError, Result};

/// Direction for moving a goal one place within the sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the front (higher priority)
    Up,
    /// Towards the back (lower priority)
    Down,
}

/// Persisted scheduler state: the ordered build sequence plus options.
///
/// The front goal is the active one. Positions in the editing methods are
/// 1-based, matching how the sequence is displayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Ordered goals; insertion order is execution priority
    #[serde(default)]
    pub goals: Vec<Goal>,

    /// Heuristic options
    #[serde(default)]
    pub options: BuildOptions,
}

impl Plan {
    /// The goal the scheduler is currently working towards.
    pub fn active_goal(&self) -> Option<&Goal> {
        self.goals.first()
    }

    /// Removes the front goal if it is `goal`.
    ///
    /// Returns `false` and leaves the sequence untouched when the front goal
    /// differs (or the sequence is empty), so replaying a retirement that was
    /// already applied is harmless.
    pub fn retire(&mut self, goal: &Goal) -> bool {
        if self.goals.first() == Some(goal) {
            self.goals.remove(0);
            true
        } else {
            false
        }
    }

    /// Appends a goal to the back of the sequence.
    pub fn push_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Inserts a goal at a 1-based position; `len + 1` appends.
    pub fn insert_goal(&mut self, position: usize, goal: Goal) -> Result<()> {
        if position == 0 || position > self.goals.len() + 1 {
            return Err(MasonError::invalid_input("position").with_reason(format!(
                "Position {position} is out of range. Sequence has {} goals",
                self.goals.len()
            )));
        }
        self.goals.insert(position - 1, goal);
        Ok(())
    }

    /// Removes and returns the goal at a 1-based position.
    pub fn remove_goal(&mut self, position: usize) -> Result<Goal> {
        let index = self.index_of(position)?;
        Ok(self.goals.remove(index))
    }

    /// Swaps two goals by their 1-based positions.
    pub fn swap_goals(&mut self, first: usize, second: usize) -> Result<()> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        self.goals.swap(a, b);
        Ok(())
    }

    /// Moves a goal one place up or down. Moving the first goal up or the
    /// last goal down is a no-op, mirroring a list widget.
    ///
    /// Returns the goal's new 1-based position.
    pub fn move_goal(&mut self, position: usize, direction: MoveDirection) -> Result<usize> {
        let index = self.index_of(position)?;
        let target = match direction {
            MoveDirection::Up => index.saturating_sub(1),
            MoveDirection::Down => (index + 1).min(self.goals.len() - 1),
        };
        self.goals.swap(index, target);
        Ok(target + 1)
    }

    /// Drops every goal; options are kept.
    pub fn clear_goals(&mut self) -> usize {
        let removed = self.goals.len();
        self.goals.clear();
        removed
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.goals.len() {
            Err(MasonError::GoalNotFound { position })
        } else {
            Ok(position - 1)
        }
    }
}
