use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use super::aggregator::{exercise_breakdown, goal_progress, summarize, week_activity, DailyGoals};
use super::dto::{SummaryQuery, SummaryResponse, WeekQuery, WeekResponse};
use crate::{
    dates::{date_or_today, format_date},
    error::AppError,
    nutrition::handlers::check_user_id,
    state::AppState,
};

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/summary/:user_id", get(daily_summary))
        .route("/summary/:user_id/week", get(weekly_activity))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    check_user_id(&user_id)?;
    let date = date_or_today(q.date.as_deref())?;

    let meals = state.store.list_meals(&user_id).await?;
    let workouts = state.store.list_workouts(&user_id).await?;

    let summary = summarize(&meals, &workouts, date);
    let goals = DailyGoals::default();
    let progress = goal_progress(&summary, &goals);
    let exercises = exercise_breakdown(&workouts, date);
    debug!(
        date = %format_date(date),
        meals = summary.meal_count,
        workouts = summary.workout_count,
        net = summary.net_calories,
        "summary computed"
    );

    Ok(Json(SummaryResponse {
        summary,
        goals,
        progress,
        exercises,
    }))
}

#[instrument(skip(state))]
pub async fn weekly_activity(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(q): Query<WeekQuery>,
) -> Result<Json<WeekResponse>, AppError> {
    check_user_id(&user_id)?;
    let today = date_or_today(q.today.as_deref())?;

    let meals = state.store.list_meals(&user_id).await?;
    let workouts = state.store.list_workouts(&user_id).await?;
    Ok(Json(week_activity(&meals, &workouts, today).into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::app::build_app;
    use crate::nutrition::foods::FoodTable;
    use crate::state::AppState;
    use crate::test_support::send;

    #[tokio::test]
    async fn empty_day_summary_is_zero() {
        let app = build_app(AppState::fake());
        let (status, s) = send(&app, Method::GET, "/api/v1/summary/u1?date=2024-01-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(s["date"], "2024-01-01");
        assert_eq!(s["calories_eaten"], 0.0);
        assert_eq!(s["net_calories"], 0.0);
        assert_eq!(s["net_status"], "deficit");
        assert_eq!(s["goals"]["calories"], 2000.0);
        assert_eq!(s["progress"]["calories"]["remaining"], 2000.0);
        assert_eq!(s["exercises"], json!([]));
    }

    #[tokio::test]
    async fn summary_combines_meals_and_workouts() {
        let app = build_app(AppState::fake());
        for food in ["egg", "banana"] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/v1/nutrition",
                Some(json!({
                    "user_id": "u1",
                    "date": "2024-01-01",
                    "meal_type": "snack",
                    "food": food,
                    "quantity": 1
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        send(
            &app,
            Method::POST,
            "/api/v1/progress",
            Some(json!({
                "user_id": "u1",
                "date": "2024-01-01",
                "completed_exercises": ["Wall Push-ups", "Tai Chi"],
                "duration_minutes": 10
            })),
        )
        .await;

        let (_, s) = send(&app, Method::GET, "/api/v1/summary/u1?date=2024-01-01", None).await;
        assert_eq!(s["meal_count"], 2);
        assert_eq!(s["workout_count"], 1);
        assert_eq!(s["calories_burned"], 45.0);
        assert_eq!(s["exercises_completed"], 2);
        assert_eq!(s["exercises"].as_array().unwrap().len(), 2);
        assert_eq!(s["exercises"][0]["duration_minutes"], 5.0);
        let eaten = s["calories_eaten"].as_f64().unwrap();
        assert_eq!(s["net_calories"].as_f64().unwrap(), eaten - 45.0);

        let (_, other) = send(&app, Method::GET, "/api/v1/summary/u1?date=2024-01-02", None).await;
        assert_eq!(other["meal_count"], 0);
    }

    #[tokio::test]
    async fn logged_meal_keeps_macros_after_table_changes() {
        let before = AppState::fake();
        let app = build_app(before.clone());
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition",
            Some(json!({
                "user_id": "u3",
                "date": "2024-01-01",
                "meal_type": "breakfast",
                "food": "egg",
                "quantity": 2
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let revised = FoodTable::load(
            r#"[{"name": "egg", "calories": 999, "protein": 1, "carbs": 50, "fat": 0, "unit": "piece"}]"#,
        )
        .unwrap();
        let after = AppState::from_parts(before.config.clone(), Arc::new(revised), before.store.clone());
        let app = build_app(after);

        let (_, s) = send(&app, Method::GET, "/api/v1/summary/u3?date=2024-01-01", None).await;
        assert_eq!(s["calories_eaten"], 156.0);
        assert_eq!(s["protein"], 12.0);
        assert_eq!(s["carbs"], 2.0);
        assert_eq!(s["fat"], 10.0);

        let (_, estimate) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition/estimate",
            Some(json!({ "food": "egg", "quantity": 2 })),
        )
        .await;
        assert_eq!(estimate["nutrition"]["calories"], 1998.0);
    }

    #[tokio::test]
    async fn week_view_marks_logged_days() {
        let app = build_app(AppState::fake());
        send(
            &app,
            Method::POST,
            "/api/v1/progress",
            Some(json!({
                "user_id": "u2",
                "date": "2024-03-01",
                "completed_exercises": ["Calf Raises"]
            })),
        )
        .await;

        let (status, w) = send(&app, Method::GET, "/api/v1/summary/u2/week?today=2024-03-02", None).await;
        assert_eq!(status, StatusCode::OK);
        let days = w["days"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2024-02-25");
        assert_eq!(days[5]["has_data"], true);
        assert_eq!(days[6]["has_data"], false);
        assert_eq!(w["active_days"], 1);
    }

    #[tokio::test]
    async fn malformed_date_is_400() {
        let app = build_app(AppState::fake());
        let (status, err) = send(&app, Method::GET, "/api/v1/summary/u1?date=01/02/2024", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("YYYY-MM-DD"));
    }
}
