use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{EstimateResponse, FoodSuggestion, NewMealRequest, SearchQuery};
use super::repo_types::LoggedMeal;
use super::resolver::{search, DEFAULT_SUGGESTIONS};
use super::scaler::{scale, DraftError, MealDraft};
use crate::{
    dates::today,
    error::{AppError, AppJson},
    profile::services::is_valid_user_id,
    state::AppState,
};

const MAX_SUGGESTIONS: usize = 20;

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/foods/:name", get(get_food))
}

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition", post(log_meal))
        .route("/nutrition/estimate", post(estimate))
        .route("/nutrition/:user_id", get(list_meals))
        .route("/nutrition/:user_id/:meal_id", delete(delete_meal))
}

pub(crate) fn check_user_id(user_id: &str) -> Result<(), AppError> {
    if is_valid_user_id(user_id) {
        Ok(())
    } else {
        Err(AppError::bad_request("user_id required"))
    }
}

impl From<DraftError> for AppError {
    fn from(e: DraftError) -> Self {
        AppError::bad_request(e.to_string())
    }
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Json<Vec<FoodSuggestion>> {
    let limit = q
        .limit
        .unwrap_or(DEFAULT_SUGGESTIONS)
        .clamp(1, MAX_SUGGESTIONS);
    let found = search(&state.foods, &q.q, limit)
        .into_iter()
        .map(FoodSuggestion::from)
        .collect();
    Json(found)
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FoodSuggestion>, AppError> {
    state
        .foods
        .lookup(&name)
        .map(|e| Json(FoodSuggestion::from(e)))
        .ok_or(AppError::NotFound("Food"))
}

#[instrument(skip(state))]
pub async fn estimate(
    State(state): State<AppState>,
    AppJson(draft): AppJson<MealDraft>,
) -> Result<Json<EstimateResponse>, AppError> {
    let entry = state
        .foods
        .lookup(&draft.food)
        .ok_or(AppError::NotFound("Food"))?;
    Ok(Json(EstimateResponse {
        food: entry.name.clone(),
        quantity: draft.quantity,
        unit_label: entry.unit_label().to_string(),
        nutrition: scale(entry, draft.quantity),
    }))
}

#[instrument(skip(state, body), fields(user_id = %body.user_id))]
pub async fn log_meal(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<LoggedMeal>), AppError> {
    check_user_id(&body.user_id)?;

    let portion = body.draft().resolve(&state.foods).map_err(|e| {
        warn!(food = %body.food, quantity = ?body.quantity, "meal rejected");
        AppError::from(e)
    })?;

    let meal = LoggedMeal {
        id: Uuid::new_v4(),
        user_id: body.user_id.clone(),
        date: body.date.unwrap_or_else(today),
        meal_type: body.meal_type,
        food_label: portion.label(),
        calories: portion.nutrition.calories,
        protein: portion.nutrition.protein,
        carbs: portion.nutrition.carbs,
        fat: portion.nutrition.fat,
    };
    state.store.insert_meal(&meal).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/nutrition/{}/{}", meal.user_id, meal.id).parse() {
        headers.insert(header::LOCATION, location);
    }

    info!(meal_id = %meal.id, calories = meal.calories, "meal logged");
    Ok((StatusCode::CREATED, headers, Json(meal)))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<LoggedMeal>>, AppError> {
    check_user_id(&user_id)?;
    Ok(Json(state.store.list_meals(&user_id).await?))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path((user_id, meal_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    check_user_id(&user_id)?;
    if state.store.delete_meal(&user_id, meal_id).await? {
        info!(%meal_id, "meal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Meal"))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::app::build_app;
    use crate::state::AppState;
    use crate::test_support::send;

    #[tokio::test]
    async fn search_returns_egg_family_in_table_order() {
        let app = build_app(AppState::fake());
        let (status, body) = send(&app, Method::GET, "/api/v1/foods/search?q=Egg", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["egg", "boiled egg", "fried egg", "scrambled egg"]);
        assert_eq!(body[0]["suggested_quantity"], 1.0);
    }

    #[tokio::test]
    async fn blank_search_is_empty() {
        let app = build_app(AppState::fake());
        let (_, body) = send(&app, Method::GET, "/api/v1/foods/search?q=", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn estimate_without_quantity_is_null() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition/estimate",
            Some(json!({ "food": "banana" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["nutrition"].is_null());

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition/estimate",
            Some(json!({ "food": "milk", "quantity": 250 })),
        )
        .await;
        assert_eq!(body["nutrition"]["calories"], 153.0);
        assert_eq!(body["unit_label"], "ml");
    }

    #[tokio::test]
    async fn log_list_and_delete_meal() {
        let app = build_app(AppState::fake());
        let (status, meal) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition",
            Some(json!({
                "user_id": "u1",
                "date": "2024-01-01",
                "meal_type": "breakfast",
                "food": "egg",
                "quantity": 2
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(meal["food_label"], "egg (2 piece)");
        assert_eq!(meal["calories"], 156.0);

        let (_, list) = send(&app, Method::GET, "/api/v1/nutrition/u1", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let uri = format!("/api/v1/nutrition/u1/{}", meal["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_body_gets_json_error() {
        let app = build_app(AppState::fake());
        let (status, err) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition",
            Some(json!({ "user_id": "u1", "food": "egg", "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("meal_type"));

        let (status, err) = send(
            &app,
            Method::POST,
            "/api/v1/nutrition/estimate",
            Some(json!({ "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_food_or_bad_quantity_is_rejected() {
        let app = build_app(AppState::fake());
        for body in [
            json!({ "user_id": "u1", "meal_type": "lunch", "food": "kale", "quantity": 1 }),
            json!({ "user_id": "u1", "meal_type": "lunch", "food": "rice", "quantity": 0 }),
            json!({ "user_id": "u1", "meal_type": "lunch", "food": "rice" }),
            json!({ "user_id": "u1", "meal_type": "lunch", "food": "cheese", "quantity": 1e308 }),
        ] {
            let (status, err) = send(&app, Method::POST, "/api/v1/nutrition", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(err["error"].is_string());
        }
    }
}
