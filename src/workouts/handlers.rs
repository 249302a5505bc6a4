use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{NewWorkoutRequest, DEFAULT_SESSION_MINUTES};
use super::exercises::{estimate_burned, generate_plan};
use super::repo_types::{LoggedWorkout, WorkoutPlan};
use crate::{
    dates::today,
    error::{AppError, AppJson},
    nutrition::handlers::check_user_id,
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/plans/:user_id", get(get_plan))
        .route("/plans/:user_id/regenerate", post(regenerate_plan))
}

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", post(log_workout))
        .route("/progress/:user_id", get(list_workouts))
        .route("/progress/:user_id/:workout_id", delete(delete_workout))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WorkoutPlan>, AppError> {
    check_user_id(&user_id)?;
    state
        .store
        .get_plan(&user_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Plan"))
}

#[instrument(skip(state))]
pub async fn regenerate_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<WorkoutPlan>, AppError> {
    check_user_id(&user_id)?;
    let profile = state
        .store
        .get_profile(&user_id)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;

    let plan = generate_plan(&user_id, profile.fitness_level);
    state.store.save_plan(&plan).await?;
    info!(level = %plan.difficulty, "plan regenerated");
    Ok(Json(plan))
}

#[instrument(skip(state, body), fields(user_id = %body.user_id))]
pub async fn log_workout(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewWorkoutRequest>,
) -> Result<(StatusCode, Json<LoggedWorkout>), AppError> {
    check_user_id(&body.user_id)?;
    let completed = body.completed();
    if completed.is_empty() {
        return Err(AppError::bad_request("complete at least one exercise"));
    }
    if let Some(d) = body.duration_minutes {
        if !d.is_finite() || d < 0.0 {
            return Err(AppError::bad_request("duration_minutes must be non-negative"));
        }
    }

    let plan = state.store.get_plan(&body.user_id).await?;
    let total_exercises = plan.as_ref().map_or(0, |p| p.exercises.len() as i64);
    let duration_minutes = body.duration_minutes.unwrap_or_else(|| {
        plan.as_ref()
            .map_or(DEFAULT_SESSION_MINUTES, |p| f64::from(p.duration_minutes))
    });

    let workout = LoggedWorkout {
        id: Uuid::new_v4(),
        user_id: body.user_id.clone(),
        date: body.date.unwrap_or_else(today),
        exercises_completed: completed.len() as i64,
        total_exercises,
        duration_minutes,
        calories_burned: estimate_burned(completed.as_slice()),
        exercise_names: completed,
    };
    state.store.insert_workout(&workout).await?;

    info!(
        workout_id = %workout.id,
        burned = workout.calories_burned,
        "workout logged"
    );
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<LoggedWorkout>>, AppError> {
    check_user_id(&user_id)?;
    Ok(Json(state.store.list_workouts(&user_id).await?))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    Path((user_id, workout_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    check_user_id(&user_id)?;
    if state.store.delete_workout(&user_id, workout_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Workout"))
    }
}
