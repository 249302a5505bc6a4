use serde::{Deserialize, Serialize};

use super::aggregator::{DailyGoals, DailySummary, DayActivity, ExerciseShare, GoalProgress};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub goals: DailyGoals,
    pub progress: GoalProgress,
    pub exercises: Vec<ExerciseShare>,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub days: Vec<DayActivity>,
    pub active_days: usize,
}

impl From<Vec<DayActivity>> for WeekResponse {
    fn from(days: Vec<DayActivity>) -> Self {
        let active_days = days.iter().filter(|d| d.has_data).count();
        Self { days, active_days }
    }
}
