//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::{GoalDB, NewGoalDB};
pub use repository::GoalRepository;
pub(crate) use repository::{clear_goals, insert_goal_rows, load_goals};
