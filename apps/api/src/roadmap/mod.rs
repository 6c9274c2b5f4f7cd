//! Roadmap assembly: prompt the model for a weekly or daily plan and reshape
//! its answer into a strictly typed `PersonalRoadmap`.
//!
//! Flow: RoadmapRequest → strategy prompt → ModelGateway → normalize → PersonalRoadmap.
//! Assembly is all-or-nothing: any field error fails the whole roadmap.

use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ModelGateway;
use crate::models::roadmap::{PersonalRoadmap, RoadmapFormat};
use crate::validation::SchemaViolations;

pub mod daily;
pub mod goals;
pub mod handlers;
pub mod prompts;
pub mod weekly;

/// Days per month in the roadmap calendar. Deliberately not calendar-exact.
pub const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Validation(#[from] SchemaViolations),

    #[error("invalid date {value:?} at {path}: expected YYYY-MM-DD")]
    DateFormat { path: String, value: String },

    #[error("invalid time {value:?} at {path}: expected HH:MM")]
    TimeFormat { path: String, value: String },
}

#[derive(Debug, Clone, Copy)]
pub struct RoadmapSettings {
    /// Daily format only: cards requested from, and accepted from, the model.
    pub max_preview_days: usize,
}

impl Default for RoadmapSettings {
    fn default() -> Self {
        Self {
            max_preview_days: 3,
        }
    }
}

/// A validated roadmap request.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapRequest {
    pub persona_type: String,
    pub duration_months: u32,
    pub user_id: Option<String>,
    pub format: RoadmapFormat,
}

impl RoadmapRequest {
    pub const MIN_DURATION_MONTHS: u32 = 1;
    pub const MAX_DURATION_MONTHS: u32 = 12;

    pub fn new(
        persona_type: String,
        duration_months: i64,
        user_id: Option<String>,
        format: RoadmapFormat,
    ) -> Result<Self, String> {
        if persona_type.trim().is_empty() {
            return Err("persona_type cannot be empty".to_string());
        }

        let duration_months = u32::try_from(duration_months)
            .ok()
            .filter(|m| (Self::MIN_DURATION_MONTHS..=Self::MAX_DURATION_MONTHS).contains(m))
            .ok_or_else(|| {
                format!(
                    "duration_months must be between {} and {}, got {duration_months}",
                    Self::MIN_DURATION_MONTHS,
                    Self::MAX_DURATION_MONTHS
                )
            })?;

        Ok(Self {
            persona_type: persona_type.trim().to_string(),
            duration_months,
            user_id,
            format,
        })
    }
}

/// Start and end of a roadmap. A pure function of the start day and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RoadmapPeriod {
    pub fn starting(today: NaiveDate, duration_months: u32) -> Self {
        Self {
            start_date: today,
            end_date: today + Duration::days(DAYS_PER_MONTH * i64::from(duration_months)),
        }
    }
}

/// Builds a roadmap in the requested format, starting `today`.
pub async fn assemble(
    gateway: &ModelGateway,
    settings: &RoadmapSettings,
    request: &RoadmapRequest,
    today: NaiveDate,
) -> Result<PersonalRoadmap, AppError> {
    info!(
        "Generating {:?} roadmap: persona={}, months={}",
        request.format, request.persona_type, request.duration_months
    );

    match request.format {
        RoadmapFormat::Weekly => weekly::generate(gateway, request, today).await,
        RoadmapFormat::Daily => {
            daily::generate(gateway, request, today, settings.max_preview_days).await
        }
    }
}
