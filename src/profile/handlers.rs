use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ProfileRequest, ProfileResponse};
use super::services::build_profile;
use crate::{
    error::{AppError, AppJson},
    nutrition::handlers::check_user_id,
    state::AppState,
    workouts::exercises::generate_plan,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", post(save_profile))
        .route("/profile/:user_id", get(get_profile))
}

/// Saves the onboarding profile and (re)generates the user's plan to match
/// the chosen fitness level.
#[instrument(skip(state, payload), fields(user_id = %payload.user_id))]
pub async fn save_profile(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = build_profile(payload).map_err(|e| {
        warn!(error = %e, "invalid profile");
        e
    })?;

    state.store.save_profile(&profile).await?;
    let plan = generate_plan(&profile.user_id, profile.fitness_level);
    state.store.save_plan(&plan).await?;

    info!(bmi = ?profile.bmi, level = %profile.fitness_level, "profile saved");
    Ok(Json(profile.into()))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    check_user_id(&user_id)?;
    state
        .store
        .get_profile(&user_id)
        .await?
        .map(|p| Json(p.into()))
        .ok_or(AppError::NotFound("Profile"))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::app::build_app;
    use crate::state::AppState;
    use crate::test_support::send;

    fn profile_body(age: u32) -> serde_json::Value {
        json!({
            "user_id": "grandma01",
            "name": "Meera",
            "age": age,
            "gender": "female",
            "height": 5.0,
            "height_unit": "ft",
            "weight": 130,
            "weight_unit": "lbs",
            "health_conditions": ["none"],
            "fitness_level": "medium",
            "goals": ["balance", "energy"]
        })
    }

    #[tokio::test]
    async fn saving_profile_creates_plan() {
        let app = build_app(AppState::fake());
        let (status, profile) =
            send(&app, Method::POST, "/api/v1/profile", Some(profile_body(72))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["fitness_level"], "intermediate");
        assert_eq!(profile["bmi"], 25.4);
        assert_eq!(profile["bmi_category"], "overweight");

        let (status, plan) = send(&app, Method::GET, "/api/v1/plans/grandma01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(plan["difficulty"], "intermediate");
        assert_eq!(plan["exercises"].as_array().unwrap().len(), 4);

        let (status, fetched) = send(&app, Method::GET, "/api/v1/profile/grandma01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Meera");
    }

    #[tokio::test]
    async fn out_of_range_age_is_rejected() {
        let app = build_app(AppState::fake());
        let (status, err) =
            send(&app, Method::POST, "/api/v1/profile", Some(profile_body(30))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("55"));
    }

    #[tokio::test]
    async fn missing_age_gets_json_error() {
        let app = build_app(AppState::fake());
        let mut body = profile_body(70);
        body.as_object_mut().unwrap().remove("age");
        let (status, err) = send(&app, Method::POST, "/api/v1/profile", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn unknown_profile_is_404() {
        let app = build_app(AppState::fake());
        let (status, _) = send(&app, Method::GET, "/api/v1/profile/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
