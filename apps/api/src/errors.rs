use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::roadmap::AssemblyError;
use crate::validation::SchemaViolations;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Request-shape problems map to 4xx. Every core failure (backend, parse,
/// model-output validation, date/time literals) maps to 500 with the error's
/// display text as the message. Display texts never include raw model output
/// or backend response bodies; those are logged only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    InvalidModelOutput(#[from] SchemaViolations),

    #[error("invalid date {value:?} at {path}: expected YYYY-MM-DD")]
    DateFormat { path: String, value: String },

    #[error("invalid time {value:?} at {path}: expected HH:MM")]
    TimeFormat { path: String, value: String },
}

impl From<AssemblyError> for AppError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Validation(violations) => AppError::InvalidModelOutput(violations),
            AssemblyError::DateFormat { path, value } => AppError::DateFormat { path, value },
            AssemblyError::TimeFormat { path, value } => AppError::TimeFormat { path, value },
        }
    }
}

impl AppError {
    /// Raw model text or backend body behind a model failure. Logged, never returned.
    fn model_detail(&self) -> Option<&str> {
        match self {
            AppError::Llm(e) => e.diagnostic(),
            _ => None,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnprocessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY")
            }
            AppError::Llm(e) if e.is_generation_failure() => {
                (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_ERROR")
            }
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PARSE_ERROR"),
            AppError::InvalidModelOutput(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_OUTPUT_INVALID")
            }
            AppError::DateFormat { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "DATE_FORMAT_ERROR"),
            AppError::TimeFormat { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "TIME_FORMAT_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg) | AppError::UnprocessableEntity(msg) => msg.clone(),
            other => {
                tracing::error!(code, "Request failed: {other}");
                if let Some(detail) = other.model_detail() {
                    tracing::debug!(code, detail, "Model failure detail");
                }
                other.to_string()
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::InvalidModelOutput(violations) = &self {
            error["fields"] = json!(violations.errors);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;
    use crate::validation::FieldError;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_request_validation_is_bad_request() {
        let (status, body) = body_of(AppError::Validation("duration_months out of range".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "duration_months out of range");
    }

    #[tokio::test]
    async fn test_parse_error_hides_raw_text() {
        let source = serde_json::from_str::<Value>("oops").unwrap_err();
        let err = AppError::Llm(LlmError::Parse {
            raw: "SECRET RAW OUTPUT".to_string(),
            source,
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PARSE_ERROR");
        assert!(!body.to_string().contains("SECRET RAW OUTPUT"));
    }

    #[test]
    fn test_model_detail_only_for_model_failures() {
        let api = AppError::Llm(LlmError::Api {
            status: 503,
            message: "backend overloaded".to_string(),
        });
        assert_eq!(api.model_detail(), Some("backend overloaded"));
        assert!(!api.to_string().contains("backend overloaded"));
        assert_eq!(AppError::Validation("bad".into()).model_detail(), None);
    }

    #[tokio::test]
    async fn test_schema_violations_list_fields() {
        let err = AppError::InvalidModelOutput(SchemaViolations {
            errors: vec![FieldError {
                path: "weeks[0].quests[0].resources[0].link".to_string(),
                reason: "missing required field".to_string(),
            }],
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["fields"][0]["path"],
            "weeks[0].quests[0].resources[0].link"
        );
    }

    #[tokio::test]
    async fn test_date_format_error_is_server_error_with_message() {
        let err = AppError::from(AssemblyError::DateFormat {
            path: "daily_cards[0].date".to_string(),
            value: "2024-02-30".to_string(),
        });
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATE_FORMAT_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("2024-02-30"));
    }
}
