//! Career matching: asks the model for careers that fit a persona profile.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_SHAPE_REMINDER;
use crate::llm_client::ModelGateway;
use crate::models::persona::CareerMatch;
use crate::survey::persona::PersonaProfile;
use crate::survey::prompts::CAREER_PROMPT_TEMPLATE;
use crate::validation::{index_path, SchemaViolations, Validator};

pub const CAREER_COUNT: usize = 5;

pub fn build_career_prompt(profile: &PersonaProfile) -> String {
    let secondary_type = profile
        .secondary
        .as_ref()
        .map(|s| s.persona_type.as_str())
        .unwrap_or("None");

    let prompt = CAREER_PROMPT_TEMPLATE
        .replace("{career_count}", &CAREER_COUNT.to_string())
        .replace("{primary_type}", &profile.primary.persona_type)
        .replace("{primary_description}", &profile.primary.description)
        .replace("{secondary_type}", secondary_type);
    format!("{prompt}\n\n{JSON_SHAPE_REMINDER}")
}

/// The top-level value must be an array; every element needs
/// `career`, `confidence` in [0, 1] and `description`.
pub fn normalize_matches(value: &Value) -> Result<Vec<CareerMatch>, SchemaViolations> {
    let mut v = Validator::new();
    let Some(items) = value.as_array() else {
        v.error("", "expected an array of career matches");
        return v.finish(None);
    };

    let mut matches = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = index_path("", i);
        let Some(obj) = v.object(item, &path) else {
            continue;
        };
        let career = v.require_str(obj, &path, "career");
        let confidence = v.require_unit_interval(obj, &path, "confidence");
        let description = v.require_str(obj, &path, "description");

        if let (Some(career), Some(confidence), Some(description)) =
            (career, confidence, description)
        {
            matches.push(CareerMatch {
                career,
                confidence,
                description,
            });
        }
    }

    v.finish(Some(matches))
}

pub async fn match_careers(
    gateway: &ModelGateway,
    profile: &PersonaProfile,
) -> Result<Vec<CareerMatch>, AppError> {
    info!("Matching careers for persona '{}'", profile.primary.persona_type);
    let value = gateway.generate(&build_career_prompt(profile)).await?;
    let matches = normalize_matches(&value)?;
    info!("Model returned {} career matches", matches.len());
    Ok(matches)
}
