use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Scale,
}

/// A catalogue question. The catalogue is static, so everything is borrowed.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveySubmission {
    #[serde(default)]
    pub user_id: Option<String>,
    pub responses: Vec<SurveyResponse>,
}

impl SurveySubmission {
    pub const MIN_RESPONSES: usize = 5;
    pub const MAX_RESPONSES: usize = 10;

    /// Checks the response count before any model call is made.
    pub fn validate(&self) -> Result<(), String> {
        let count = self.responses.len();
        if !(Self::MIN_RESPONSES..=Self::MAX_RESPONSES).contains(&count) {
            return Err(format!(
                "responses must contain between {} and {} items, got {count}",
                Self::MIN_RESPONSES,
                Self::MAX_RESPONSES
            ));
        }
        Ok(())
    }
}
