//! Axum route handlers for the Survey API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::persona::PersonaResult;
use crate::models::survey::{SurveyQuestion, SurveySubmission};
use crate::state::AppState;
use crate::survey::careers::match_careers;
use crate::survey::catalogue::QUESTIONS;
use crate::survey::persona::{detect, PersonaProfile};

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: &'static [SurveyQuestion],
}

/// GET /survey/questions
pub async fn handle_get_questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: &QUESTIONS,
    })
}

/// POST /survey/submit
///
/// Persona detection followed by career matching. All-or-nothing: any
/// failure in either step fails the request.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(submission): Json<SurveySubmission>,
) -> Result<Json<PersonaResult>, AppError> {
    submission.validate().map_err(AppError::UnprocessableEntity)?;

    let raw_persona = detect(&state.gateway, &submission.responses).await?;
    let profile = PersonaProfile::from_value(&raw_persona)?;
    info!(
        "Persona detected: {} ({:.2})",
        profile.primary.persona_type, profile.primary.confidence
    );

    let career_matches = match_careers(&state.gateway, &profile).await?;

    Ok(Json(PersonaResult {
        user_id: submission.user_id,
        primary_persona: profile.primary,
        secondary_persona: profile.secondary,
        career_matches,
        analysis: profile.analysis,
    }))
}
