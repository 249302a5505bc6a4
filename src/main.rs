mod app;
mod config;
mod dates;
mod db;
mod error;
mod nutrition;
mod profile;
mod progress;
mod state;
mod store;
#[cfg(test)]
mod test_support;
mod workouts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "oldisgold=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = state::AppState::init().await?;

    let config = state.config.clone();
    let app = app::build_app(state);
    app::serve(app, &config).await
}
