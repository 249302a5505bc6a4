use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::nutrition::repo_types::{LoggedMeal, MealRow};
use crate::profile::repo_types::{Profile, ProfileRow};
use crate::store::ProgressStore;
use crate::workouts::repo_types::{LoggedWorkout, PlanRow, WorkoutPlan};

#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self { db })
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn save_profile(&self, p: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, age, gender, height, height_unit, weight,
                                  weight_unit, bmi, health_conditions, fitness_level, goals)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                height = EXCLUDED.height,
                height_unit = EXCLUDED.height_unit,
                weight = EXCLUDED.weight,
                weight_unit = EXCLUDED.weight_unit,
                bmi = EXCLUDED.bmi,
                health_conditions = EXCLUDED.health_conditions,
                fitness_level = EXCLUDED.fitness_level,
                goals = EXCLUDED.goals,
                updated_at = now()
            "#,
        )
        .bind(&p.user_id)
        .bind(&p.name)
        .bind(i32::try_from(p.age)?)
        .bind(&p.gender)
        .bind(p.height)
        .bind(p.height_unit.as_str())
        .bind(p.weight)
        .bind(p.weight_unit.as_str())
        .bind(p.bmi)
        .bind(&p.health_conditions)
        .bind(p.fitness_level.as_str())
        .bind(&p.goals)
        .execute(&self.db)
        .await
        .context("save profile")?;
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, name, age, gender, height, height_unit, weight, weight_unit,
                   bmi, health_conditions, fitness_level, goals
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get profile")?;
        row.map(Profile::try_from).transpose()
    }

    async fn save_plan(&self, plan: &WorkoutPlan) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plans (user_id, difficulty, exercises, duration_minutes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                difficulty = EXCLUDED.difficulty,
                exercises = EXCLUDED.exercises,
                duration_minutes = EXCLUDED.duration_minutes,
                created_at = now()
            "#,
        )
        .bind(&plan.user_id)
        .bind(plan.difficulty.as_str())
        .bind(sqlx::types::Json(&plan.exercises))
        .bind(i32::try_from(plan.duration_minutes)?)
        .execute(&self.db)
        .await
        .context("save plan")?;
        Ok(())
    }

    async fn get_plan(&self, user_id: &str) -> anyhow::Result<Option<WorkoutPlan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT user_id, difficulty, exercises, duration_minutes
            FROM plans
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get plan")?;
        row.map(WorkoutPlan::try_from).transpose()
    }

    async fn insert_meal(&self, m: &LoggedMeal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, user_id, date, meal_type, food_label, calories, protein, carbs, fat)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(m.id)
        .bind(&m.user_id)
        .bind(m.date)
        .bind(m.meal_type.as_str())
        .bind(&m.food_label)
        .bind(m.calories)
        .bind(m.protein)
        .bind(m.carbs)
        .bind(m.fat)
        .execute(&self.db)
        .await
        .context("insert meal")?;
        Ok(())
    }

    async fn list_meals(&self, user_id: &str) -> anyhow::Result<Vec<LoggedMeal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, user_id, date, meal_type, food_label, calories, protein, carbs, fat
            FROM meals
            WHERE user_id = $1
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meals")?;
        rows.into_iter().map(LoggedMeal::try_from).collect()
    }

    async fn delete_meal(&self, user_id: &str, meal_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_workout(&self, w: &LoggedWorkout) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workouts (id, user_id, date, exercises_completed, total_exercises,
                                  duration_minutes, calories_burned, exercise_names)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(w.id)
        .bind(&w.user_id)
        .bind(w.date)
        .bind(w.exercises_completed)
        .bind(w.total_exercises)
        .bind(w.duration_minutes)
        .bind(w.calories_burned)
        .bind(&w.exercise_names)
        .execute(&self.db)
        .await
        .context("insert workout")?;
        Ok(())
    }

    async fn list_workouts(&self, user_id: &str) -> anyhow::Result<Vec<LoggedWorkout>> {
        let rows = sqlx::query_as::<_, LoggedWorkout>(
            r#"
            SELECT id, user_id, date, exercises_completed, total_exercises,
                   duration_minutes, calories_burned, exercise_names
            FROM workouts
            WHERE user_id = $1
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list workouts")?;
        Ok(rows)
    }

    async fn delete_workout(&self, user_id: &str, workout_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete workout")?;
        Ok(res.rows_affected() > 0)
    }
}
