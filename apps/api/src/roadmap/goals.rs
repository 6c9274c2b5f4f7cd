use serde_json::Value;

use crate::models::roadmap::Goal;
use crate::validation::{child_path, Validator};

const PATH: &str = "overall_goals";

/// Entries of a flat goal list that count as short term; the rest are long term.
const LEGACY_SHORT_TERM_COUNT: usize = 3;

/// Reads `overall_goals` in either of the shapes models produce:
///
/// - `{"short_term": [...], "long_term": [...]}`, where a missing list is empty;
/// - `["goal", ...]`: legacy flat list, split after the first three entries;
/// - absent or null: no goals.
pub fn goals_from_value(v: &mut Validator, value: Option<&Value>) -> Goal {
    match value {
        None | Some(Value::Null) => Goal::default(),
        Some(Value::Array(items)) => {
            let mut short_term = v.string_list(items, PATH);
            let long_term = short_term.split_off(short_term.len().min(LEGACY_SHORT_TERM_COUNT));
            Goal {
                short_term,
                long_term,
            }
        }
        Some(other) => {
            let Some(obj) = v.object(other, PATH) else {
                return Goal::default();
            };
            let mut list = |key: &str| {
                v.optional_array(obj, PATH, key)
                    .map(|items| v.string_list(items, &child_path(PATH, key)))
                    .unwrap_or_default()
            };
            Goal {
                short_term: list("short_term"),
                long_term: list("long_term"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn read(value: Option<Value>) -> (Goal, bool) {
        let mut v = Validator::new();
        let goal = goals_from_value(&mut v, value.as_ref());
        (goal, v.is_clean())
    }

    #[test]
    fn test_absent_goals_are_empty() {
        let (goal, clean) = read(None);
        assert_eq!(goal, Goal::default());
        assert!(clean);

        let (goal, _) = read(Some(Value::Null));
        assert!(goal.short_term.is_empty() && goal.long_term.is_empty());
    }

    #[test]
    fn test_object_shape() {
        let (goal, clean) = read(Some(json!({"short_term": ["a"], "long_term": ["b", "c"]})));
        assert!(clean);
        assert_eq!(goal.short_term, vec!["a"]);
        assert_eq!(goal.long_term, vec!["b", "c"]);
    }

    #[test]
    fn test_object_with_missing_list_defaults_to_empty() {
        let (goal, clean) = read(Some(json!({"short_term": ["a"]})));
        assert!(clean);
        assert!(goal.long_term.is_empty());
    }

    #[test]
    fn test_legacy_flat_list_is_split_after_three() {
        let (goal, clean) = read(Some(json!(["a", "b", "c", "d", "e"])));
        assert!(clean);
        assert_eq!(goal.short_term, vec!["a", "b", "c"]);
        assert_eq!(goal.long_term, vec!["d", "e"]);
    }

    #[test]
    fn test_short_legacy_list_is_all_short_term() {
        let (goal, _) = read(Some(json!(["a", "b"])));
        assert_eq!(goal.short_term, vec!["a", "b"]);
        assert!(goal.long_term.is_empty());
    }

    #[test]
    fn test_non_string_goal_is_an_error() {
        let (_, clean) = read(Some(json!({"short_term": [1]})));
        assert!(!clean);
        let (_, clean) = read(Some(json!("be better")));
        assert!(!clean);
    }
}
