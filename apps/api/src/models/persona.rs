use serde::{Deserialize, Serialize};

/// An inferred personality archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaType {
    #[serde(rename = "type")]
    pub persona_type: String,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career: String,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub description: String,
}

/// Response body of `POST /survey/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaResult {
    pub user_id: Option<String>,
    pub primary_persona: PersonaType,
    pub secondary_persona: Option<PersonaType>,
    pub career_matches: Vec<CareerMatch>,
    pub analysis: String,
}
