use std::collections::HashMap;

use indexmap::IndexMap;

use crate::condition::{AnswerSnapshot, Condition, evaluate_condition};
use crate::projection::FieldInstance;

/// Field id to its enablement conditions, for call sites that keep conditions
/// in a side table rather than on the primitive.
pub type ConditionMap = HashMap<String, Vec<Condition>>;

/// Field path to enabled flag, in instance order.
pub type EnablementMap = IndexMap<String, bool>;

/// All conditions must hold. No conditions means always enabled.
pub fn is_question_enabled<A: AnswerSnapshot + ?Sized>(
    conditions: Option<&[Condition]>,
    answers: &A,
) -> bool {
    conditions
        .unwrap_or_default()
        .iter()
        .all(|condition| evaluate_condition(condition, answers))
}

pub fn is_question_id_enabled<A: AnswerSnapshot + ?Sized>(
    id: &str,
    conditions: &ConditionMap,
    answers: &A,
) -> bool {
    is_question_enabled(conditions.get(id).map(Vec::as_slice), answers)
}

pub fn resolve_enablement<A: AnswerSnapshot + ?Sized>(
    instances: &[FieldInstance<'_>],
    answers: &A,
) -> EnablementMap {
    instances
        .iter()
        .map(|instance| (instance.path.clone(), instance.is_enabled(answers)))
        .collect()
}

/// Reverse index from a referenced field id to the instances whose conditions
/// read it. Lets a single answer change re-check only the affected fields.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    dependents: HashMap<String, Vec<usize>>,
}

impl DependencyIndex {
    pub fn new(instances: &[FieldInstance<'_>]) -> Self {
        let mut dependents: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, instance) in instances.iter().enumerate() {
            for condition in instance.enable_when() {
                let entry = dependents.entry(condition.field_id.clone()).or_default();
                if entry.last() != Some(&index) {
                    entry.push(index);
                }
            }
        }
        Self { dependents }
    }

    /// Indices into the instance slice the index was built from.
    pub fn dependents_of(&self, field_id: &str) -> &[usize] {
        self.dependents
            .get(field_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Re-evaluates the fields that depend on `changed` and updates `map` in
    /// place. Returns the paths whose flag flipped.
    pub fn recheck<A: AnswerSnapshot + ?Sized>(
        &self,
        instances: &[FieldInstance<'_>],
        changed: &str,
        answers: &A,
        map: &mut EnablementMap,
    ) -> Vec<String> {
        let mut flipped = Vec::new();
        for &index in self.dependents_of(changed) {
            let Some(instance) = instances.get(index) else {
                continue;
            };
            let enabled = instance.is_enabled(answers);
            let previous = map.insert(instance.path.clone(), enabled);
            if previous != Some(enabled) {
                flipped.push(instance.path.clone());
            }
        }
        flipped
    }
}
