pub mod dto;
pub mod foods;
pub mod handlers;
pub mod repo_types;
pub mod resolver;
pub mod scaler;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::food_routes())
        .merge(handlers::meal_routes())
}
