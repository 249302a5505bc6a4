//! Folds logged meals and workouts into per-day views.
//!
//! Everything here is a pure function of its input slices; summaries are
//! recomputed on every read and never stored.

use std::collections::HashSet;

use serde::Serialize;
use time::{Date, Duration};

use crate::dates::iso_date;
use crate::nutrition::repo_types::LoggedMeal;
use crate::workouts::repo_types::LoggedWorkout;

/// Net intake above this is over budget.
pub const OVER_BUDGET_NET_CALORIES: f64 = 500.0;

/// Length of the trailing activity window, today included.
pub const WEEK_DAYS: i64 = 7;

/// Duration assumed for a workout that recorded none.
const FALLBACK_WORKOUT_MINUTES: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetCalorieStatus {
    OverBudget,
    OnBudget,
    Deficit,
}

impl NetCalorieStatus {
    pub fn classify(net_calories: f64) -> Self {
        if net_calories > OVER_BUDGET_NET_CALORIES {
            NetCalorieStatus::OverBudget
        } else if net_calories > 0.0 {
            NetCalorieStatus::OnBudget
        } else {
            NetCalorieStatus::Deficit
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub calories_eaten: f64,
    pub calories_burned: f64,
    /// Eaten minus burned; negative on a deficit day.
    pub net_calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub exercises_completed: i64,
    pub duration_minutes: f64,
    pub meal_count: usize,
    pub workout_count: usize,
    pub net_status: NetCalorieStatus,
}

pub fn summarize(meals: &[LoggedMeal], workouts: &[LoggedWorkout], date: Date) -> DailySummary {
    let mut s = DailySummary {
        date,
        calories_eaten: 0.0,
        calories_burned: 0.0,
        net_calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        exercises_completed: 0,
        duration_minutes: 0.0,
        meal_count: 0,
        workout_count: 0,
        net_status: NetCalorieStatus::Deficit,
    };

    for m in meals.iter().filter(|m| m.date == date) {
        s.calories_eaten += m.calories;
        s.protein += m.protein;
        s.carbs += m.carbs;
        s.fat += m.fat;
        s.meal_count += 1;
    }
    for w in workouts.iter().filter(|w| w.date == date) {
        s.calories_burned += w.calories_burned;
        s.exercises_completed += w.exercises_completed;
        s.duration_minutes += w.duration_minutes;
        s.workout_count += 1;
    }

    s.net_calories = s.calories_eaten - s.calories_burned;
    s.net_status = NetCalorieStatus::classify(s.net_calories);
    s
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 110.0,
            carbs: 250.0,
            fat: 65.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieProgress {
    pub consumed: f64,
    pub goal: f64,
    /// May go negative once the goal is exceeded.
    pub remaining: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    pub total: f64,
    pub goal: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories: CalorieProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
}

fn capped_percent(total: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (total / goal * 100.0).clamp(0.0, 100.0)
}

fn macro_progress(total: f64, goal: f64) -> MacroProgress {
    MacroProgress {
        total,
        goal,
        percent: capped_percent(total, goal),
    }
}

pub fn goal_progress(summary: &DailySummary, goals: &DailyGoals) -> GoalProgress {
    GoalProgress {
        calories: CalorieProgress {
            consumed: summary.calories_eaten,
            goal: goals.calories,
            remaining: goals.calories - summary.calories_eaten,
            percent: capped_percent(summary.calories_eaten, goals.calories),
        },
        protein: macro_progress(summary.protein, goals.protein),
        carbs: macro_progress(summary.carbs, goals.carbs),
        fat: macro_progress(summary.fat, goals.fat),
    }
}

/// One completed exercise with an even share of its session's time and burn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseShare {
    pub name: String,
    pub duration_minutes: f64,
    pub calories: f64,
}

pub fn exercise_breakdown(workouts: &[LoggedWorkout], date: Date) -> Vec<ExerciseShare> {
    workouts
        .iter()
        .filter(|w| w.date == date)
        .flat_map(|w| {
            let divisor = w.exercises_completed.max(1) as f64;
            let minutes = if w.duration_minutes > 0.0 {
                w.duration_minutes
            } else {
                FALLBACK_WORKOUT_MINUTES
            };
            let duration_minutes = (minutes / divisor).round();
            let calories = (w.calories_burned / divisor).round();
            w.exercise_names.iter().map(move |name| ExerciseShare {
                name: name.clone(),
                duration_minutes,
                calories,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub has_data: bool,
}

/// Trailing window ending at `today`, oldest first, flagging days with any
/// meal or workout. This is a presence calendar, not a consecutive-day
/// streak count.
pub fn week_activity(
    meals: &[LoggedMeal],
    workouts: &[LoggedWorkout],
    today: Date,
) -> Vec<DayActivity> {
    let active: HashSet<Date> = meals
        .iter()
        .map(|m| m.date)
        .chain(workouts.iter().map(|w| w.date))
        .collect();

    (0..WEEK_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub(Duration::days(back)))
        .map(|date| DayActivity {
            date,
            has_data: active.contains(&date),
        })
        .collect()
}
