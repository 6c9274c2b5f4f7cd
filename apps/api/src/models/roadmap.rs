use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(raw))
    }
}

/// One scheduled activity on a daily card. `start_time < end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub time_slot: TimeSlot,
    /// Free text, e.g. "90 minutes".
    pub estimated_time: String,
    /// 1 (highest) – 5
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCard {
    pub date: NaiveDate,
    pub focus_area: String,
    pub tasks: Vec<Task>,
    pub reflection_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub task_type: String,
    pub task_name: String,
    pub resources: Vec<Resource>,
    pub time_commitment: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTheme {
    pub week_number: u32,
    pub theme: String,
    pub quests: Vec<Quest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapFormat {
    #[default]
    Weekly,
    Daily,
}

/// The body of a roadmap: weekly themes or daily cards, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum RoadmapPlan {
    Weekly { weeks: Vec<WeeklyTheme> },
    Daily { daily_cards: Vec<DailyCard> },
}

impl RoadmapPlan {
    pub fn format(&self) -> RoadmapFormat {
        match self {
            RoadmapPlan::Weekly { .. } => RoadmapFormat::Weekly,
            RoadmapPlan::Daily { .. } => RoadmapFormat::Daily,
        }
    }
}

/// Response body of `POST /roadmap/generate`.
///
/// `end_date` is always `start_date + 30 * duration_months` days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRoadmap {
    pub user_id: Option<String>,
    pub persona_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_months: u32,
    pub overall_goals: Goal,
    #[serde(flatten)]
    pub plan: RoadmapPlan,
}

impl PersonalRoadmap {
    pub fn weeks(&self) -> Option<&[WeeklyTheme]> {
        match &self.plan {
            RoadmapPlan::Weekly { weeks } => Some(weeks),
            RoadmapPlan::Daily { .. } => None,
        }
    }

    pub fn daily_cards(&self) -> Option<&[DailyCard]> {
        match &self.plan {
            RoadmapPlan::Daily { daily_cards } => Some(daily_cards),
            RoadmapPlan::Weekly { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn roadmap(plan: RoadmapPlan) -> PersonalRoadmap {
        PersonalRoadmap {
            user_id: Some("u1".to_string()),
            persona_type: "analytical".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            duration_months: 1,
            overall_goals: Goal::default(),
            plan,
        }
    }

    #[test]
    fn test_time_slot_parse_is_case_insensitive() {
        assert_eq!(TimeSlot::parse(" Morning "), Some(TimeSlot::Morning));
        assert_eq!(TimeSlot::parse("NIGHT"), Some(TimeSlot::Night));
        assert_eq!(TimeSlot::parse("midday"), None);
    }

    #[test]
    fn test_weekly_plan_serializes_without_daily_cards() {
        let value = serde_json::to_value(roadmap(RoadmapPlan::Weekly { weeks: vec![] })).unwrap();
        assert_eq!(value["format"], "weekly");
        assert_eq!(value["weeks"], json!([]));
        assert!(value.get("daily_cards").is_none());
        assert_eq!(value["start_date"], "2024-01-01");
    }

    #[test]
    fn test_daily_plan_serializes_without_weeks() {
        let value = serde_json::to_value(roadmap(RoadmapPlan::Daily {
            daily_cards: vec![],
        }))
        .unwrap();
        assert_eq!(value["format"], "daily");
        assert!(value.get("weeks").is_none());
    }

    #[test]
    fn test_plan_accessors_match_variant() {
        let weekly = roadmap(RoadmapPlan::Weekly { weeks: vec![] });
        assert!(weekly.weeks().is_some());
        assert!(weekly.daily_cards().is_none());
        assert_eq!(weekly.plan.format(), RoadmapFormat::Weekly);
    }

    #[test]
    fn test_roadmap_deserializes_from_its_own_json() {
        let original = roadmap(RoadmapPlan::Daily {
            daily_cards: vec![],
        });
        let json = serde_json::to_string(&original).unwrap();
        let parsed: PersonalRoadmap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_task_omits_absent_resources() {
        let task = Task {
            title: "Read".to_string(),
            description: "Read a chapter".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            time_slot: TimeSlot::Morning,
            estimated_time: "90 minutes".to_string(),
            priority: 1,
            resources: None,
        };
        let value = serde_json::to_value(task).unwrap();
        assert!(value.get("resources").is_none());
        assert_eq!(value["start_time"], "08:00:00");
    }
}
