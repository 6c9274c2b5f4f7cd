// All model prompt templates for the survey module.

/// Persona detection prompt. Replace `{responses}` before sending.
pub const PERSONA_PROMPT_TEMPLATE: &str = r#"Based on the following survey responses, identify the person's primary personality archetype (analytical, empathetic, aggressive, philosophical, etc.) and provide an analysis.

Survey Responses:
{responses}

Return a JSON object with this EXACT structure:
{
  "primary": {
    "type": "personality type name",
    "confidence": 0.85,
    "description": "Description of this personality type"
  },
  "secondary": {
    "type": "secondary personality type",
    "confidence": 0.65,
    "description": "Description of this personality type"
  },
  "analysis": "Detailed analysis of the person's responses and personality"
}

RULES:
1. "confidence" values are numbers between 0 and 1
2. "secondary" may be null when no second archetype is clearly present"#;

/// Career matching prompt.
/// Replace: {career_count}, {primary_type}, {primary_description}, {secondary_type}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Based on the following personality profile, suggest the top {career_count} career matches.

Primary personality type: {primary_type}
Description: {primary_description}

Secondary personality type: {secondary_type}

Return a JSON ARRAY (not an object) where each element has this structure:
[
  {
    "career": "career name",
    "confidence": 0.92,
    "description": "Why this career is a good match for the personality"
  }
]

RULES:
1. Return exactly {career_count} elements, best match first
2. "confidence" is a number between 0 and 1"#;
