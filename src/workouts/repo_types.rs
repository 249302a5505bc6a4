use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::dates::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[serde(alias = "low")]
    Beginner,
    #[serde(alias = "medium")]
    Intermediate,
    #[serde(alias = "high")]
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" | "low" => Ok(FitnessLevel::Beginner),
            "intermediate" | "medium" => Ok(FitnessLevel::Intermediate),
            "advanced" | "high" => Ok(FitnessLevel::Advanced),
            other => anyhow::bail!("unknown fitness level '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanExercise {
    pub name: String,
    pub reps: String,
    pub duration_minutes: u32,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub user_id: String,
    pub difficulty: FitnessLevel,
    pub exercises: Vec<PlanExercise>,
    pub duration_minutes: u32,
}

#[derive(Debug, FromRow)]
pub struct PlanRow {
    pub user_id: String,
    pub difficulty: String,
    pub exercises: sqlx::types::Json<Vec<PlanExercise>>,
    pub duration_minutes: i32,
}

impl TryFrom<PlanRow> for WorkoutPlan {
    type Error = anyhow::Error;

    fn try_from(r: PlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: r.user_id,
            difficulty: r.difficulty.parse()?,
            exercises: r.exercises.0,
            duration_minutes: u32::try_from(r.duration_minutes)?,
        })
    }
}

/// A finished workout session. Same immutability contract as a logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LoggedWorkout {
    pub id: Uuid,
    pub user_id: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default)]
    pub exercises_completed: i64,
    #[serde(default)]
    pub total_exercises: i64,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub calories_burned: f64,
    #[serde(default)]
    pub exercise_names: Vec<String>,
}
