pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::roadmap::handlers as roadmap;
use crate::state::AppState;
use crate::survey::handlers as survey;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Survey API
        .route("/survey/questions", get(survey::handle_get_questions))
        .route("/survey/submit", post(survey::handle_submit))
        // Roadmap API
        .route("/roadmap/generate", post(roadmap::handle_generate))
        .with_state(state)
}
