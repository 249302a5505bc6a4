use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::nutrition::repo_types::LoggedMeal;
use crate::profile::repo_types::Profile;
use crate::workouts::repo_types::{LoggedWorkout, WorkoutPlan};

/// Persistence for everything a user records. Meals and workouts are
/// insert-or-delete only; profiles and plans are replaced wholesale.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()>;
    async fn get_profile(&self, user_id: &str) -> anyhow::Result<Option<Profile>>;

    async fn save_plan(&self, plan: &WorkoutPlan) -> anyhow::Result<()>;
    async fn get_plan(&self, user_id: &str) -> anyhow::Result<Option<WorkoutPlan>>;

    async fn insert_meal(&self, meal: &LoggedMeal) -> anyhow::Result<()>;
    async fn list_meals(&self, user_id: &str) -> anyhow::Result<Vec<LoggedMeal>>;
    /// Returns whether a row was removed.
    async fn delete_meal(&self, user_id: &str, meal_id: Uuid) -> anyhow::Result<bool>;

    async fn insert_workout(&self, workout: &LoggedWorkout) -> anyhow::Result<()>;
    async fn list_workouts(&self, user_id: &str) -> anyhow::Result<Vec<LoggedWorkout>>;
    async fn delete_workout(&self, user_id: &str, workout_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, Profile>,
    plans: HashMap<String, WorkoutPlan>,
    meals: Vec<LoggedMeal>,
    workouts: Vec<LoggedWorkout>,
}

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> anyhow::Result<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }

    async fn save_plan(&self, plan: &WorkoutPlan) -> anyhow::Result<()> {
        self.tables
            .write()
            .await
            .plans
            .insert(plan.user_id.clone(), plan.clone());
        Ok(())
    }

    async fn get_plan(&self, user_id: &str) -> anyhow::Result<Option<WorkoutPlan>> {
        Ok(self.tables.read().await.plans.get(user_id).cloned())
    }

    async fn insert_meal(&self, meal: &LoggedMeal) -> anyhow::Result<()> {
        self.tables.write().await.meals.push(meal.clone());
        Ok(())
    }

    async fn list_meals(&self, user_id: &str) -> anyhow::Result<Vec<LoggedMeal>> {
        let tables = self.tables.read().await;
        Ok(tables
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_meal(&self, user_id: &str, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.meals.len();
        tables
            .meals
            .retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(tables.meals.len() != before)
    }

    async fn insert_workout(&self, workout: &LoggedWorkout) -> anyhow::Result<()> {
        self.tables.write().await.workouts.push(workout.clone());
        Ok(())
    }

    async fn list_workouts(&self, user_id: &str) -> anyhow::Result<Vec<LoggedWorkout>> {
        let tables = self.tables.read().await;
        Ok(tables
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_workout(&self, user_id: &str, workout_id: Uuid) -> anyhow::Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.workouts.len();
        tables
            .workouts
            .retain(|w| !(w.id == workout_id && w.user_id == user_id));
        Ok(tables.workouts.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::repo_types::MealType;
    use time::macros::date;

    fn meal(user_id: &str) -> LoggedMeal {
        LoggedMeal {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            date: date!(2024 - 01 - 01),
            meal_type: MealType::Breakfast,
            food_label: "egg (2 piece)".into(),
            calories: 156.0,
            protein: 12.0,
            carbs: 2.0,
            fat: 10.0,
        }
    }

    #[tokio::test]
    async fn meals_are_scoped_to_their_user() {
        let store = MemoryStore::new();
        store.insert_meal(&meal("a")).await.unwrap();
        store.insert_meal(&meal("b")).await.unwrap();
        assert_eq!(store.list_meals("a").await.unwrap().len(), 1);
        assert!(store.list_meals("c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let store = MemoryStore::new();
        let m = meal("a");
        store.insert_meal(&m).await.unwrap();
        assert!(!store.delete_meal("b", m.id).await.unwrap());
        assert!(store.delete_meal("a", m.id).await.unwrap());
        assert!(!store.delete_meal("a", m.id).await.unwrap());
    }
}
