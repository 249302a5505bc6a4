use serde::Deserialize;
use time::Date;

use crate::dates::iso_date;

/// Default session length when the user has no plan to take it from.
pub const DEFAULT_SESSION_MINUTES: f64 = 15.0;

#[derive(Debug, Deserialize)]
pub struct NewWorkoutRequest {
    pub user_id: String,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    #[serde(default)]
    pub completed_exercises: Vec<String>,
    pub duration_minutes: Option<f64>,
}

impl NewWorkoutRequest {
    pub fn completed(&self) -> Vec<String> {
        self.completed_exercises
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }
}
