mod dto;
pub mod exercises;
pub mod handlers;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::plan_routes())
        .merge(handlers::progress_routes())
}
