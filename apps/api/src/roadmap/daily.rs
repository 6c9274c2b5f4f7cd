//! Daily strategy: a short preview of day-by-day cards with timed tasks.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_SHAPE_REMINDER;
use crate::llm_client::ModelGateway;
use crate::models::roadmap::{DailyCard, PersonalRoadmap, RoadmapPlan, Task, TimeSlot};
use crate::roadmap::goals::goals_from_value;
use crate::roadmap::prompts::DAILY_PROMPT_TEMPLATE;
use crate::roadmap::{AssemblyError, RoadmapPeriod, RoadmapRequest};
use crate::validation::{child_path, index_path, Validator};

const MAX_TASKS_PER_CARD: usize = 5;

pub fn build_daily_prompt(
    request: &RoadmapRequest,
    period: &RoadmapPeriod,
    max_days: usize,
) -> String {
    let prompt = DAILY_PROMPT_TEMPLATE
        .replace("{persona_type}", &request.persona_type)
        .replace("{duration_months}", &request.duration_months.to_string())
        .replace("{start_date}", &period.start_date.to_string())
        .replace("{preview_days}", &max_days.to_string());
    format!("{prompt}\n\n{JSON_SHAPE_REMINDER}")
}

pub async fn generate(
    gateway: &ModelGateway,
    request: &RoadmapRequest,
    today: NaiveDate,
    max_days: usize,
) -> Result<PersonalRoadmap, AppError> {
    let period = RoadmapPeriod::starting(today, request.duration_months);
    let value = gateway
        .generate(&build_daily_prompt(request, &period, max_days))
        .await?;
    let roadmap = normalize(&value, request, period, max_days)?;
    info!(
        "Daily roadmap assembled: {} cards",
        roadmap.daily_cards().map_or(0, |c| c.len())
    );
    Ok(roadmap)
}

/// Parses an exact `YYYY-MM-DD` literal. Impossible calendar dates fail.
pub fn parse_card_date(raw: &str, path: &str) -> Result<NaiveDate, AssemblyError> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    shaped
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| AssemblyError::DateFormat {
            path: path.to_string(),
            value: raw.to_string(),
        })
}

/// Reads the hour and minute of `HH:MM[:...]`; later components are ignored.
pub fn parse_clock_time(raw: &str, path: &str) -> Result<NaiveTime, AssemblyError> {
    let mut parts = raw.trim().split(':');
    let mut component = || parts.next().and_then(|p| p.trim().parse::<u32>().ok());

    let time = match (component(), component()) {
        (Some(hour), Some(minute)) => NaiveTime::from_hms_opt(hour, minute, 0),
        _ => None,
    };
    time.ok_or_else(|| AssemblyError::TimeFormat {
        path: path.to_string(),
        value: raw.to_string(),
    })
}

/// Reshapes the model's daily payload, keeping at most `max_days` cards.
///
/// Field errors accumulate; a malformed date or time literal fails at once.
pub fn normalize(
    value: &Value,
    request: &RoadmapRequest,
    period: RoadmapPeriod,
    max_days: usize,
) -> Result<PersonalRoadmap, AssemblyError> {
    let mut v = Validator::new();
    let Some(root) = v.object(value, "") else {
        return v.finish(None).map_err(AssemblyError::from);
    };

    let card_values = v.optional_array(root, "", "daily_cards").unwrap_or(&[]);
    if card_values.len() > max_days {
        warn!(
            "Model returned {} daily cards, keeping the first {}",
            card_values.len(),
            max_days
        );
    }

    let mut daily_cards = Vec::with_capacity(card_values.len().min(max_days));
    for (i, card) in card_values.iter().take(max_days).enumerate() {
        if let Some(card) = daily_card(&mut v, card, &index_path("daily_cards", i))? {
            daily_cards.push(card);
        }
    }
    let overall_goals = goals_from_value(&mut v, root.get("overall_goals"));

    let roadmap = PersonalRoadmap {
        user_id: request.user_id.clone(),
        persona_type: request.persona_type.clone(),
        start_date: period.start_date,
        end_date: period.end_date,
        duration_months: request.duration_months,
        overall_goals,
        plan: RoadmapPlan::Daily { daily_cards },
    };
    Ok(v.finish(Some(roadmap))?)
}

fn daily_card(
    v: &mut Validator,
    value: &Value,
    path: &str,
) -> Result<Option<DailyCard>, AssemblyError> {
    let Some(obj) = v.object(value, path) else {
        return Ok(None);
    };

    let date = match v.require_str(obj, path, "date") {
        Some(raw) => Some(parse_card_date(&raw, &child_path(path, "date"))?),
        None => None,
    };
    let focus_area = v.require_str(obj, path, "focus_area");

    let tasks_path = child_path(path, "tasks");
    let task_values = match v.require_array(obj, path, "tasks") {
        Some(items) => {
            if !(1..=MAX_TASKS_PER_CARD).contains(&items.len()) {
                v.error(
                    tasks_path.as_str(),
                    format!("expected 1 to {MAX_TASKS_PER_CARD} tasks, got {}", items.len()),
                );
            }
            items
        }
        None => &[],
    };
    let mut tasks = Vec::with_capacity(task_values.len());
    for (i, task_value) in task_values.iter().enumerate() {
        if let Some(task) = task(v, task_value, &index_path(&tasks_path, i))? {
            tasks.push(task);
        }
    }

    let reflection_prompt = v.require_str(obj, path, "reflection_prompt");

    Ok(date
        .zip(focus_area)
        .zip(reflection_prompt)
        .map(|((date, focus_area), reflection_prompt)| DailyCard {
            date,
            focus_area,
            tasks,
            reflection_prompt,
        }))
}

fn task(v: &mut Validator, value: &Value, path: &str) -> Result<Option<Task>, AssemblyError> {
    let Some(obj) = v.object(value, path) else {
        return Ok(None);
    };

    let title = v.require_str(obj, path, "title");
    let description = v.require_str(obj, path, "description");
    let start_time = clock_field(v, obj, path, "start_time")?;
    let end_time = clock_field(v, obj, path, "end_time")?;
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start >= end {
            v.error(
                child_path(path, "end_time"),
                format!("must be after start_time ({start} >= {end})"),
            );
        }
    }

    let time_slot = v.require_str(obj, path, "time_slot").and_then(|raw| {
        let slot = TimeSlot::parse(&raw);
        if slot.is_none() {
            v.error(
                child_path(path, "time_slot"),
                format!("expected morning, afternoon, evening or night, got {raw:?}"),
            );
        }
        slot
    });
    let estimated_time = v.require_str(obj, path, "estimated_time");
    let priority = v.require_int(obj, path, "priority", 1..=5);

    let resources = match obj.get("resources") {
        None | Some(Value::Null) => None,
        Some(_) => v
            .optional_array(obj, path, "resources")
            .map(|items| v.string_list(items, &child_path(path, "resources"))),
    };

    let task = (|| {
        Some(Task {
            title: title?,
            description: description?,
            start_time: start_time?,
            end_time: end_time?,
            time_slot: time_slot?,
            estimated_time: estimated_time?,
            priority: u8::try_from(priority?).ok()?,
            resources,
        })
    })();
    Ok(task)
}

fn clock_field(
    v: &mut Validator,
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Option<NaiveTime>, AssemblyError> {
    v.require_str(obj, path, key)
        .map(|raw| parse_clock_time(&raw, &child_path(path, key)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::roadmap::RoadmapFormat;
    use crate::roadmap::fixtures::{daily_payload, request, task as task_json, today};

    fn period() -> RoadmapPeriod {
        RoadmapPeriod::starting(today(), 6)
    }

    fn run(payload: &Value) -> Result<PersonalRoadmap, AssemblyError> {
        normalize(payload, &request(RoadmapFormat::Daily, 6), period(), 3)
    }

    fn validation_paths(err: AssemblyError) -> Vec<String> {
        match err {
            AssemblyError::Validation(v) => v.errors.into_iter().map(|e| e.path).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_caps_preview_days() {
        let prompt = build_daily_prompt(&request(RoadmapFormat::Daily, 6), &period(), 3);
        assert!(prompt.contains("exactly 3 consecutive days starting on 2024-01-31"));
        assert!(prompt.contains("covers 6 month(s)"));
        assert!(!prompt.contains("{preview_days}"));
    }

    #[test]
    fn test_parse_card_date() {
        assert_eq!(
            parse_card_date("2024-02-29", "d").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        for bad in ["2024-02-30", "2024/02/01", "2024-2-1", "01-02-2024", " 2024-02-01", "+024-02-01"] {
            assert!(
                matches!(parse_card_date(bad, "d"), Err(AssemblyError::DateFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_clock_time() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(parse_clock_time("08:00", "t").unwrap(), at(8, 0));
        assert_eq!(parse_clock_time("8:05", "t").unwrap(), at(8, 5));
        assert_eq!(parse_clock_time("08:00:00", "t").unwrap(), at(8, 0));
        for bad in ["8", "aa:bb", "", "24:00", "12:60"] {
            assert!(
                matches!(parse_clock_time(bad, "t"), Err(AssemblyError::TimeFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_well_formed_payload() {
        let roadmap = run(&daily_payload(&["2024-01-31", "2024-02-01"])).unwrap();
        let cards = roadmap.daily_cards().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(cards[0].tasks.len(), 2);
        assert_eq!(cards[0].tasks[0].time_slot, TimeSlot::Morning);
        assert_eq!(
            cards[0].tasks[0].resources.as_deref(),
            Some(&["https://example.com/guide".to_string()][..])
        );
        assert_eq!(roadmap.overall_goals.long_term, vec!["Become a mentor"]);
        assert!(roadmap.weeks().is_none());
    }

    #[test]
    fn test_cards_beyond_preview_are_dropped() {
        let payload = daily_payload(&[
            "2024-01-31",
            "2024-02-01",
            "2024-02-02",
            "2024-02-03",
            "2024-02-04",
        ]);
        let roadmap = run(&payload).unwrap();
        assert_eq!(roadmap.daily_cards().unwrap().len(), 3);
    }

    #[test]
    fn test_dropped_cards_are_not_validated() {
        let payload = daily_payload(&["2024-01-31", "2024-02-01", "2024-02-02", "not a date"]);
        assert!(run(&payload).is_ok());
    }

    #[test]
    fn test_invalid_calendar_date_is_date_format_error() {
        let err = run(&daily_payload(&["2024-02-30"])).unwrap_err();
        match err {
            AssemblyError::DateFormat { path, value } => {
                assert_eq!(path, "daily_cards[0].date");
                assert_eq!(value, "2024-02-30");
            }
            other => panic!("expected date error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_component_time_is_time_format_error() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["daily_cards"][0]["tasks"][1]["start_time"] = json!("8");
        let err = run(&payload).unwrap_err();
        match err {
            AssemblyError::TimeFormat { path, .. } => {
                assert_eq!(path, "daily_cards[0].tasks[1].start_time")
            }
            other => panic!("expected time error, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_goal_list_is_split() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["overall_goals"] = json!(["a", "b", "c", "d"]);
        let roadmap = run(&payload).unwrap();
        assert_eq!(roadmap.overall_goals.short_term, vec!["a", "b", "c"]);
        assert_eq!(roadmap.overall_goals.long_term, vec!["d"]);
    }

    #[test]
    fn test_task_must_end_after_it_starts() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["daily_cards"][0]["tasks"][0] = task_json("10:00", "09:00");
        let err = run(&payload).unwrap_err();
        assert_eq!(validation_paths(err), vec!["daily_cards[0].tasks[0].end_time"]);
    }

    #[test]
    fn test_task_count_bounds() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["daily_cards"][0]["tasks"] = json!([]);
        let err = run(&payload).unwrap_err();
        assert_eq!(validation_paths(err), vec!["daily_cards[0].tasks"]);

        let six: Vec<Value> = (0..6).map(|_| task_json("08:00", "09:00")).collect();
        payload["daily_cards"][0]["tasks"] = json!(six);
        assert!(run(&payload).is_err());
    }

    #[test]
    fn test_bad_slot_and_priority_are_reported_together() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["daily_cards"][0]["tasks"][0]["time_slot"] = json!("midday");
        payload["daily_cards"][0]["tasks"][0]["priority"] = json!(9);
        let err = run(&payload).unwrap_err();
        assert_eq!(
            validation_paths(err),
            vec![
                "daily_cards[0].tasks[0].time_slot",
                "daily_cards[0].tasks[0].priority"
            ]
        );
    }

    #[test]
    fn test_slot_is_case_insensitive_and_resources_optional() {
        let mut payload = daily_payload(&["2024-01-31"]);
        payload["daily_cards"][0]["tasks"][0]["time_slot"] = json!("Evening");
        payload["daily_cards"][0]["tasks"][0]
            .as_object_mut()
            .unwrap()
            .remove("resources");
        let roadmap = run(&payload).unwrap();
        let task = &roadmap.daily_cards().unwrap()[0].tasks[0];
        assert_eq!(task.time_slot, TimeSlot::Evening);
        assert!(task.resources.is_none());
    }
}
