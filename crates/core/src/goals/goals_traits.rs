use async_trait::async_trait;

use super::goals_model::{Goal, GoalSummary, NewGoal};
use crate::errors::Result;

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn load_goals(&self) -> Result<()>;
    fn get_goals(&self) -> Vec<Goal>;
    /// Goals whose saved amount is still below target.
    fn get_active_goals(&self) -> Vec<Goal>;
    fn get_completed_goals(&self) -> Vec<Goal>;
    /// Up to five active goals, nearest target date first.
    fn get_upcoming_goals(&self) -> Vec<Goal>;
    fn get_summary(&self) -> GoalSummary;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: i64) -> Result<usize>;
    /// Add `amount` to the saved amount of a goal.
    async fn add_to_goal(&self, goal_id: i64, amount: f64) -> Result<Goal>;
}
