//! Axum route handler for the Roadmap API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::roadmap::{PersonalRoadmap, RoadmapFormat};
use crate::roadmap::{assemble, RoadmapRequest};
use crate::state::AppState;

fn default_duration_months() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapQuery {
    pub persona_type: String,
    #[serde(default = "default_duration_months")]
    pub duration_months: i64,
    pub user_id: Option<String>,
    #[serde(default)]
    pub format_type: RoadmapFormat,
}

/// POST /roadmap/generate?persona_type=&duration_months=&user_id=&format_type=
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateRoadmapQuery>,
) -> Result<Json<PersonalRoadmap>, AppError> {
    let request = RoadmapRequest::new(
        query.persona_type,
        query.duration_months,
        query.user_id,
        query.format_type,
    )
    .map_err(AppError::Validation)?;

    let today = chrono::Local::now().date_naive();
    let roadmap = assemble(&state.gateway, &state.roadmap, &request, today).await?;
    info!(
        "Roadmap ready: format={:?}, {} to {}",
        roadmap.plan.format(),
        roadmap.start_date,
        roadmap.end_date
    );
    Ok(Json(roadmap))
}
