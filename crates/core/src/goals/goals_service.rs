use std::sync::Arc;

use async_trait::async_trait;

use super::goals_model::{Goal, GoalSummary, NewGoal};
use super::goals_traits::GoalServiceTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::records::{RecordRepositoryTrait, RecordService, RecordStore};
use crate::utils::time_utils::Clock;

const UPCOMING_LIMIT: usize = 5;

pub struct GoalService {
    store: RecordStore<Goal>,
    clock: Arc<dyn Clock>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn RecordRepositoryTrait<Goal>>, clock: Arc<dyn Clock>) -> Self {
        GoalService {
            store: RecordStore::new(repository),
            clock,
        }
    }
}

impl RecordService for GoalService {
    type Record = Goal;

    fn record_store(&self) -> &RecordStore<Goal> {
        &self.store
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn load_goals(&self) -> Result<()> {
        self.store.load()
    }

    fn get_goals(&self) -> Vec<Goal> {
        self.store.list()
    }

    fn get_active_goals(&self) -> Vec<Goal> {
        self.store
            .list()
            .into_iter()
            .filter(|g| !g.is_completed())
            .collect()
    }

    fn get_completed_goals(&self) -> Vec<Goal> {
        self.store
            .list()
            .into_iter()
            .filter(Goal::is_completed)
            .collect()
    }

    fn get_upcoming_goals(&self) -> Vec<Goal> {
        let mut active = self.get_active_goals();
        active.sort_by_key(|g| g.target_date);
        active.truncate(UPCOMING_LIMIT);
        active
    }

    fn get_summary(&self) -> GoalSummary {
        let goals = self.store.list();
        let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
        let total_saved: f64 = goals.iter().map(|g| g.current_amount).sum();
        let completed_count = goals.iter().filter(|g| g.is_completed()).count();
        GoalSummary {
            total_target,
            total_saved,
            overall_progress: if total_target > 0.0 {
                total_saved / total_target * 100.0
            } else {
                0.0
            },
            active_count: goals.len() - completed_count,
            completed_count,
        }
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: None,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            category: new_goal.category,
            icon: new_goal.icon,
            color: new_goal.color,
            created_at: self.clock.now_millis(),
        };
        self.store.create(goal).await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Goal> {
        self.store.update(goal).await
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<usize> {
        self.store.delete(goal_id).await
    }

    async fn add_to_goal(&self, goal_id: i64, amount: f64) -> Result<Goal> {
        let mut goal = self.store.find(goal_id).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("Goal {}", goal_id)))
        })?;
        goal.current_amount += amount;
        self.store.update(goal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::test_support::{FixedClock, InMemoryRepository};
    use chrono::{TimeZone, Utc};

    fn new_goal(name: &str, target: f64, saved: f64, target_date: i64) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            target_amount: target,
            current_amount: saved,
            target_date,
            category: "Savings".to_string(),
            icon: None,
            color: None,
        }
    }

    fn service() -> GoalService {
        let clock = Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()));
        GoalService::new(Arc::new(InMemoryRepository::<Goal>::new()), clock)
    }

    #[tokio::test]
    async fn test_summary_and_partition() {
        let service = service();
        service.create_goal(new_goal("Car", 100000.0, 25000.0, 300)).await.unwrap();
        service.create_goal(new_goal("Phone", 50000.0, 50000.0, 100)).await.unwrap();

        let summary = service.get_summary();
        assert_eq!(summary.total_target, 150000.0);
        assert_eq!(summary.total_saved, 75000.0);
        assert_eq!(summary.overall_progress, 50.0);
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(service.get_active_goals()[0].name, "Car");
        assert_eq!(service.get_completed_goals()[0].name, "Phone");
    }

    #[tokio::test]
    async fn test_upcoming_goals_limited_and_sorted() {
        let service = service();
        for i in (0..7).rev() {
            service
                .create_goal(new_goal(&format!("G{}", i), 10.0, 0.0, i))
                .await
                .unwrap();
        }
        let upcoming = service.get_upcoming_goals();
        assert_eq!(upcoming.len(), 5);
        let dates: Vec<i64> = upcoming.iter().map(|g| g.target_date).collect();
        assert_eq!(dates, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_add_to_goal() {
        let service = service();
        let goal = service.create_goal(new_goal("Trip", 1000.0, 100.0, 0)).await.unwrap();
        let updated = service.add_to_goal(goal.id.unwrap(), 250.0).await.unwrap();
        assert_eq!(updated.current_amount, 350.0);
        assert_eq!(service.get_goals()[0].current_amount, 350.0);
    }

    #[tokio::test]
    async fn test_add_to_missing_goal_fails() {
        let service = service();
        assert!(service.add_to_goal(42, 1.0).await.is_err());
    }

    #[test]
    fn test_progress_capped() {
        let goal = Goal {
            id: Some(1),
            name: "x".to_string(),
            target_amount: 100.0,
            current_amount: 150.0,
            target_date: 0,
            category: "x".to_string(),
            icon: None,
            color: None,
            created_at: 0,
        };
        assert_eq!(goal.progress_percent(), 100.0);
    }
}
