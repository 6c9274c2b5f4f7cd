//! Weekly strategy: `duration_months * 4` themed weeks of quests.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_SHAPE_REMINDER;
use crate::llm_client::ModelGateway;
use crate::models::roadmap::{PersonalRoadmap, Quest, Resource, RoadmapPlan, WeeklyTheme};
use crate::roadmap::goals::goals_from_value;
use crate::roadmap::prompts::WEEKLY_PROMPT_TEMPLATE;
use crate::roadmap::{AssemblyError, RoadmapPeriod, RoadmapRequest};
use crate::validation::{child_path, index_path, Validator};

pub const WEEKS_PER_MONTH: u32 = 4;

pub fn build_weekly_prompt(request: &RoadmapRequest, period: &RoadmapPeriod) -> String {
    let prompt = WEEKLY_PROMPT_TEMPLATE
        .replace("{persona_type}", &request.persona_type)
        .replace("{duration_months}", &request.duration_months.to_string())
        .replace("{start_date}", &period.start_date.to_string())
        .replace("{end_date}", &period.end_date.to_string())
        .replace(
            "{week_count}",
            &(request.duration_months * WEEKS_PER_MONTH).to_string(),
        );
    format!("{prompt}\n\n{JSON_SHAPE_REMINDER}")
}

pub async fn generate(
    gateway: &ModelGateway,
    request: &RoadmapRequest,
    today: NaiveDate,
) -> Result<PersonalRoadmap, AppError> {
    let period = RoadmapPeriod::starting(today, request.duration_months);
    let value = gateway
        .generate(&build_weekly_prompt(request, &period))
        .await?;
    let roadmap = normalize(&value, request, period)?;
    info!(
        "Weekly roadmap assembled: {} weeks",
        roadmap.weeks().map_or(0, |w| w.len())
    );
    Ok(roadmap)
}

/// Reshapes the model's weekly payload. Weeks and quests keep the order the
/// model returned them in; `overall_goals`, `quests` and `resources` may be absent.
pub fn normalize(
    value: &Value,
    request: &RoadmapRequest,
    period: RoadmapPeriod,
) -> Result<PersonalRoadmap, AssemblyError> {
    let mut v = Validator::new();
    let Some(root) = v.object(value, "") else {
        return v.finish(None).map_err(AssemblyError::from);
    };

    let week_values = v.optional_array(root, "", "weeks").unwrap_or(&[]);
    let expected_weeks = (request.duration_months * WEEKS_PER_MONTH) as usize;
    if week_values.len() != expected_weeks {
        warn!(
            "Model returned {} weeks, {} were requested",
            week_values.len(),
            expected_weeks
        );
    }

    let weeks: Vec<WeeklyTheme> = week_values
        .iter()
        .enumerate()
        .filter_map(|(i, week)| weekly_theme(&mut v, week, &index_path("weeks", i)))
        .collect();
    let overall_goals = goals_from_value(&mut v, root.get("overall_goals"));

    let roadmap = PersonalRoadmap {
        user_id: request.user_id.clone(),
        persona_type: request.persona_type.clone(),
        start_date: period.start_date,
        end_date: period.end_date,
        duration_months: request.duration_months,
        overall_goals,
        plan: RoadmapPlan::Weekly { weeks },
    };
    Ok(v.finish(Some(roadmap))?)
}

fn weekly_theme(v: &mut Validator, value: &Value, path: &str) -> Option<WeeklyTheme> {
    let obj = v.object(value, path)?;
    let week_number = v.require_int(obj, path, "week_number", 1..=i64::from(u32::MAX));
    let theme = v.require_str(obj, path, "theme");

    let quests_path = child_path(path, "quests");
    let quests: Vec<Quest> = v
        .optional_array(obj, path, "quests")
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .filter_map(|(i, q)| quest(v, q, &index_path(&quests_path, i)))
        .collect();

    Some(WeeklyTheme {
        week_number: u32::try_from(week_number?).ok()?,
        theme: theme?,
        quests,
    })
}

fn quest(v: &mut Validator, value: &Value, path: &str) -> Option<Quest> {
    let obj = v.object(value, path)?;
    let task_type = v.require_str(obj, path, "task_type");
    let task_name = v.require_str(obj, path, "task_name");

    let resources_path = child_path(path, "resources");
    let resources: Vec<Resource> = v
        .optional_array(obj, path, "resources")
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .filter_map(|(i, r)| resource(v, r, &index_path(&resources_path, i)))
        .collect();

    let time_commitment = v.require_str(obj, path, "time_commitment");
    let activity = v.require_str(obj, path, "activity");

    Some(Quest {
        task_type: task_type?,
        task_name: task_name?,
        resources,
        time_commitment: time_commitment?,
        activity: activity?,
    })
}

fn resource(v: &mut Validator, value: &Value, path: &str) -> Option<Resource> {
    let obj = v.object(value, path)?;
    let title = v.require_str(obj, path, "title");
    let link = v.require_str(obj, path, "link");
    Some(Resource {
        title: title?,
        link: link?,
    })
}
