use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::answer;
use super::health;
use super::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/get_answer", post(answer::get_answer))
        // Bundled chat page
        .fallback_service(
            ServeDir::new("public").fallback(ServeFile::new("public/index.html")),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
