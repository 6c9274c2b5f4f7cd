//! Persona inference: turns survey answers into a personality profile.
//!
//! `detect` returns the model's JSON as-is (after gateway repair);
//! `PersonaProfile::from_value` is the typed, validated view of it.

use serde_json::Value;
use tracing::info;

use crate::llm_client::prompts::JSON_SHAPE_REMINDER;
use crate::llm_client::{LlmError, ModelGateway};
use crate::models::persona::PersonaType;
use crate::models::survey::SurveyResponse;
use crate::survey::prompts::PERSONA_PROMPT_TEMPLATE;
use crate::validation::{SchemaViolations, Validator};

/// One line per answer: `Question ID: <id>, Answer: <answer>`.
pub fn format_responses(responses: &[SurveyResponse]) -> String {
    responses
        .iter()
        .map(|r| format!("Question ID: {}, Answer: {}", r.question_id, r.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_persona_prompt(responses: &[SurveyResponse]) -> String {
    let prompt = PERSONA_PROMPT_TEMPLATE.replace("{responses}", &format_responses(responses));
    format!("{prompt}\n\n{JSON_SHAPE_REMINDER}")
}

/// Asks the model for a persona. The result is unvalidated.
pub async fn detect(gateway: &ModelGateway, responses: &[SurveyResponse]) -> Result<Value, LlmError> {
    info!("Detecting persona from {} survey responses", responses.len());
    gateway.generate(&build_persona_prompt(responses)).await
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonaProfile {
    pub primary: PersonaType,
    pub secondary: Option<PersonaType>,
    pub analysis: String,
}

impl PersonaProfile {
    /// Requires `primary.{type,confidence,description}` and `analysis`.
    /// A non-null `secondary` must be complete too.
    pub fn from_value(value: &Value) -> Result<Self, SchemaViolations> {
        let mut v = Validator::new();
        let Some(root) = v.object(value, "") else {
            return v.finish(None);
        };

        let primary = match root.get("primary") {
            Some(p) if !p.is_null() => persona_type(&mut v, p, "primary"),
            _ => {
                v.error("primary", "missing required field");
                None
            }
        };
        let secondary = match root.get("secondary") {
            Some(s) if !s.is_null() => persona_type(&mut v, s, "secondary"),
            _ => None,
        };
        let analysis = v.require_str(root, "", "analysis");

        let profile = match (primary, analysis) {
            (Some(primary), Some(analysis)) => Some(PersonaProfile {
                primary,
                secondary,
                analysis,
            }),
            _ => None,
        };
        v.finish(profile)
    }
}

fn persona_type(v: &mut Validator, value: &Value, path: &str) -> Option<PersonaType> {
    let obj = v.object(value, path)?;
    let persona_type = v.require_str(obj, path, "type");
    let confidence = v.require_unit_interval(obj, path, "confidence");
    let description = v.require_str(obj, path, "description");

    Some(PersonaType {
        persona_type: persona_type?,
        confidence: confidence?,
        description: description?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::gateway_replying;

    fn responses(count: usize) -> Vec<SurveyResponse> {
        (1..=count)
            .map(|i| SurveyResponse {
                question_id: format!("q{i}"),
                answer: format!("answer {i}"),
            })
            .collect()
    }

    fn full_payload() -> Value {
        json!({
            "primary": {"type": "analytical", "confidence": 0.85, "description": "Logical"},
            "secondary": {"type": "philosophical", "confidence": 0.6, "description": "Reflective"},
            "analysis": "Prefers structure."
        })
    }

    #[test]
    fn test_format_responses_one_line_each() {
        let text = format_responses(&responses(2));
        assert_eq!(
            text,
            "Question ID: q1, Answer: answer 1\nQuestion ID: q2, Answer: answer 2"
        );
    }

    #[test]
    fn test_prompt_embeds_all_responses() {
        let prompt = build_persona_prompt(&responses(5));
        assert!(prompt.contains("Question ID: q5, Answer: answer 5"));
        assert!(!prompt.contains("{responses}"));
    }

    #[test]
    fn test_profile_from_full_payload() {
        let profile = PersonaProfile::from_value(&full_payload()).unwrap();
        assert_eq!(profile.primary.persona_type, "analytical");
        assert_eq!(profile.secondary.unwrap().persona_type, "philosophical");
        assert_eq!(profile.analysis, "Prefers structure.");
    }

    #[test]
    fn test_secondary_is_optional() {
        let mut payload = full_payload();
        payload["secondary"] = Value::Null;
        assert!(PersonaProfile::from_value(&payload).unwrap().secondary.is_none());

        payload.as_object_mut().unwrap().remove("secondary");
        assert!(PersonaProfile::from_value(&payload).unwrap().secondary.is_none());
    }

    #[test]
    fn test_confidence_out_of_range_is_rejected() {
        let mut payload = full_payload();
        payload["primary"]["confidence"] = json!(1.5);
        let err = PersonaProfile::from_value(&payload).unwrap_err();
        assert_eq!(err.errors[0].path, "primary.confidence");
    }

    #[test]
    fn test_incomplete_secondary_is_rejected() {
        let mut payload = full_payload();
        payload["secondary"] = json!({"type": "empathetic"});
        let err = PersonaProfile::from_value(&payload).unwrap_err();
        let paths: Vec<_> = err.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["secondary.confidence", "secondary.description"]);
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let err = PersonaProfile::from_value(&json!({"primary": {"type": "x"}})).unwrap_err();
        let paths: Vec<_> = err.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["primary.confidence", "primary.description", "analysis"]
        );
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(PersonaProfile::from_value(&json!(["analytical"])).is_err());
    }

    #[tokio::test]
    async fn test_detect_returns_parsed_payload() {
        let raw = full_payload().to_string();
        let (gateway, backend) = gateway_replying(&[raw.as_str()]);
        let value = detect(&gateway, &responses(5)).await.unwrap();
        assert_eq!(value, full_payload());
        assert!(backend.prompts()[0].contains("Question ID: q1"));
    }
}
