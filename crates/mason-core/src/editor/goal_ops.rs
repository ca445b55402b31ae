//! Build sequence operations for the PlanEditor.

use log::info;

use super::PlanEditor;
use crate::{
    error::Result,
    models::Goal,
    params::{AddGoal, InsertGoal, MoveGoal, Position, SwapGoals},
};

impl PlanEditor {
    /// Appends a goal to the back of the build sequence.
    ///
    /// Returns the goal and its 1-based position.
    pub async fn add_goal(&self, params: &AddGoal) -> Result<(usize, Goal)> {
        let goal = params.validate()?;
        let context = self.context.clone();

        self.update(move |plan| {
            plan.push_goal(goal.clone());
            info!(
                "Added '{}' level {} to '{context}' at position {}",
                goal.building,
                goal.target_level,
                plan.goals.len()
            );
            Ok((plan.goals.len(), goal))
        })
        .await
    }

    /// Inserts a goal at a 1-based position, shifting later goals back.
    pub async fn insert_goal(&self, params: &InsertGoal) -> Result<Goal> {
        let goal = params.goal.validate()?;
        let position = params.position;

        self.update(move |plan| {
            plan.insert_goal(position, goal.clone())?;
            info!(
                "Inserted '{}' level {} at position {position}",
                goal.building, goal.target_level
            );
            Ok(goal)
        })
        .await
    }

    /// Removes the goal at a 1-based position.
    pub async fn remove_goal(&self, params: &Position) -> Result<Goal> {
        let position = params.position;
        self.update(move |plan| plan.remove_goal(position)).await
    }

    /// Moves a goal one place up or down. Returns its new position.
    pub async fn move_goal(&self, params: &MoveGoal) -> Result<usize> {
        let MoveGoal {
            position,
            direction,
        } = *params;
        self.update(move |plan| plan.move_goal(position, direction))
            .await
    }

    /// Swaps two goals by position.
    pub async fn swap_goals(&self, params: &SwapGoals) -> Result<()> {
        let SwapGoals { first, second } = *params;
        self.update(move |plan| plan.swap_goals(first, second))
            .await
    }

    /// Drops every goal, keeping the options. Returns how many were dropped.
    pub async fn clear_goals(&self) -> Result<usize> {
        self.update(|plan| Ok(plan.clear_goals())).await
    }
}
