use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comparison applied by a [`Condition`]. `=` and `!=` carry the expected
/// string; `exists` carries nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "operator")]
pub enum Operator {
    #[serde(rename = "=")]
    Equals { value: String },
    #[serde(rename = "!=")]
    NotEquals { value: String },
    #[serde(rename = "exists")]
    Exists,
}

/// Enablement rule over a single answer, addressed by its full dot path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_id: String,
    #[serde(flatten)]
    pub operator: Operator,
}

impl Condition {
    pub fn equals(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            operator: Operator::Equals {
                value: value.into(),
            },
        }
    }

    pub fn not_equals(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            operator: Operator::NotEquals {
                value: value.into(),
            },
        }
    }

    pub fn exists(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            operator: Operator::Exists,
        }
    }
}

/// Read-only view of answers keyed by full dot path.
pub trait AnswerSnapshot {
    /// `None` when the field has never been answered; a stored `null` is
    /// `Some(Value::Null)`.
    fn answer(&self, field_id: &str) -> Option<&Value>;
}

impl AnswerSnapshot for Map<String, Value> {
    fn answer(&self, field_id: &str) -> Option<&Value> {
        self.get(field_id)
    }
}

impl AnswerSnapshot for HashMap<String, Value> {
    fn answer(&self, field_id: &str) -> Option<&Value> {
        self.get(field_id)
    }
}

impl AnswerSnapshot for BTreeMap<String, Value> {
    fn answer(&self, field_id: &str) -> Option<&Value> {
        self.get(field_id)
    }
}

/// Nested answer trees are walked segment by segment; numeric segments index
/// into arrays.
impl AnswerSnapshot for Value {
    fn answer(&self, field_id: &str) -> Option<&Value> {
        field_id
            .split('.')
            .try_fold(self, |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

impl<T: AnswerSnapshot + ?Sized> AnswerSnapshot for &T {
    fn answer(&self, field_id: &str) -> Option<&Value> {
        (**self).answer(field_id)
    }
}

/// Evaluates one condition. Only string answers can equal a condition value.
pub fn evaluate_condition<A: AnswerSnapshot + ?Sized>(condition: &Condition, answers: &A) -> bool {
    let answer = answers.answer(&condition.field_id);
    match &condition.operator {
        Operator::Equals { value } => matches_string(answer, value),
        Operator::NotEquals { value } => !matches_string(answer, value),
        Operator::Exists => answer.is_some(),
    }
}

fn matches_string(answer: Option<&Value>, expected: &str) -> bool {
    matches!(answer, Some(Value::String(actual)) if actual == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_round_trips_operator_tag() {
        let condition: Condition = serde_json::from_value(json!({
            "fieldId": "sq.sq1",
            "operator": "=",
            "value": "yes"
        }))
        .expect("deserialize");
        assert_eq!(condition, Condition::equals("sq.sq1", "yes"));

        let exists = serde_json::to_value(Condition::exists("sq.sq3")).expect("serialize");
        assert_eq!(exists, json!({ "fieldId": "sq.sq3", "operator": "exists" }));
    }

    #[test]
    fn equality_requires_string_answers() {
        let answers = json!({ "a": true, "b": "true" });
        assert!(!evaluate_condition(&Condition::equals("a", "true"), &answers));
        assert!(evaluate_condition(&Condition::equals("b", "true"), &answers));
    }

    #[test]
    fn nested_lookup_walks_objects_and_arrays() {
        let answers = json!({ "e9": { "left": { "pain": "yes" } }, "items": [{ "a": "x" }] });
        assert_eq!(answers.answer("e9.left.pain"), Some(&json!("yes")));
        assert_eq!(answers.answer("items.0.a"), Some(&json!("x")));
        assert_eq!(answers.answer("e9.right.pain"), None);
    }

    #[test]
    fn present_null_counts_as_existing() {
        let answers = json!({ "a": null });
        assert!(evaluate_condition(&Condition::exists("a"), &answers));
        assert!(!evaluate_condition(&Condition::exists("b"), &answers));
    }
}
