//! The fixed survey question catalogue. Not generated; never changes at runtime.

use crate::models::survey::{QuestionType, SurveyQuestion};

const fn multiple_choice(
    id: &'static str,
    text: &'static str,
    options: &'static [&'static str],
) -> SurveyQuestion {
    SurveyQuestion {
        id,
        text,
        question_type: QuestionType::MultipleChoice,
        options: Some(options),
    }
}

pub static QUESTIONS: [SurveyQuestion; 8] = [
    multiple_choice(
        "q1",
        "How do you typically approach problem-solving?",
        &[
            "Break it down logically step by step",
            "Consider how it affects everyone involved",
            "Act quickly and decisively",
            "Explore multiple creative possibilities",
        ],
    ),
    multiple_choice(
        "q2",
        "In a group setting, you are most likely to:",
        &[
            "Lead the discussion and make decisions",
            "Facilitate and ensure everyone is heard",
            "Analyze and provide critical insights",
            "Generate creative ideas and possibilities",
        ],
    ),
    multiple_choice(
        "q3",
        "When facing a setback, your first reaction is to:",
        &[
            "Analyze what went wrong and create a plan",
            "Consider how everyone is feeling",
            "Push harder and overcome the obstacle",
            "Step back and look for alternative approaches",
        ],
    ),
    multiple_choice(
        "q4",
        "What energizes you most?",
        &[
            "Solving complex problems",
            "Meaningful conversations with others",
            "Achieving goals and getting results",
            "Exploring new ideas and possibilities",
        ],
    ),
    multiple_choice(
        "q5",
        "In your ideal career, what would you value most?",
        &[
            "Intellectual challenge and expertise",
            "Making a difference in people's lives",
            "Leadership and achievement",
            "Innovation and creativity",
        ],
    ),
    multiple_choice(
        "q6",
        "How do you make important decisions?",
        &[
            "Analyze all data and consider logical consequences",
            "Consider how it will impact others and align with values",
            "Make a quick decision based on what will get results",
            "Consider multiple alternatives and follow intuition",
        ],
    ),
    multiple_choice(
        "q7",
        "When learning something new, you prefer to:",
        &[
            "Understand the underlying principles and structure",
            "Learn alongside others in a supportive environment",
            "Jump in and learn through trial and error",
            "Explore connections to other concepts and possibilities",
        ],
    ),
    multiple_choice(
        "q8",
        "What type of work environment helps you thrive?",
        &[
            "Quiet, organized, and structured",
            "Collaborative, harmonious, and supportive",
            "Fast-paced, challenging, and results-oriented",
            "Flexible, innovative, and open to new ideas",
        ],
    ),
];
