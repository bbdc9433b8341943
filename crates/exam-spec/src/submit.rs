use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::answers::{AnswerSet, Meta};
use crate::flatten::{ErrorTree, FlatAnswers, FlatErrors, flatten, nest_errors};
use crate::projection::{FieldInstance, instances_from_model};
use crate::spec::node::ModelNode;
use crate::validate::validate_fields;

/// Answers filtered down to enabled fields, with their validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// The submitted tree minus every disabled field's answer.
    pub answers: Value,
    /// Flat view of `answers`, keyed by full path.
    pub flat: FlatAnswers,
    pub disabled: Vec<String>,
    pub errors: ErrorTree,
    #[serde(skip)]
    pub flat_errors: FlatErrors,
    /// Keys in the submitted tree that belong to no field.
    pub unknown_fields: Vec<String>,
}

impl Submission {
    pub fn is_valid(&self) -> bool {
        self.flat_errors.is_empty()
    }

    pub fn into_answer_set(self, section_id: &str, spec_version: &str) -> AnswerSet {
        let meta = (!self.disabled.is_empty()).then(|| Meta {
            dropped: self.disabled,
        });
        AnswerSet {
            section_id: section_id.to_string(),
            spec_version: spec_version.to_string(),
            answers: self.answers,
            meta,
        }
    }
}

/// Filters and validates a section's answer tree for persistence.
///
/// Enablement is evaluated against the answers that survive filtering, and
/// re-evaluated until the set of disabled fields stops changing, so a hidden
/// answer can never keep another field enabled.
pub fn prepare_submission(section_root: &str, model: &ModelNode, answers: &Value) -> Submission {
    let instances = instances_from_model(section_root, model);
    let original = flatten(answers, section_root);

    let mut disabled = vec![false; instances.len()];
    let mut snapshot = original.clone();
    for _ in 0..=instances.len() {
        let next: Vec<bool> = instances
            .iter()
            .map(|instance| !instance.is_enabled(&snapshot))
            .collect();
        if next == disabled {
            break;
        }
        disabled = next;
        let hidden = disabled_paths(&instances, &disabled);
        snapshot = original.clone();
        snapshot.retain(|key, _| !owned_by_any(key, &hidden));
    }

    let hidden = disabled_paths(&instances, &disabled);
    let mut pruned = answers.clone();
    for path in &hidden {
        match relative_segments(section_root, path) {
            // The model is a single question answered at the root.
            Some(segments) if segments.is_empty() => pruned = Value::Null,
            Some(segments) => remove_path(&mut pruned, segments),
            None => {}
        }
    }

    let known: HashSet<&str> = instances
        .iter()
        .map(|instance| instance.path.as_str())
        .collect();
    let unknown_fields: Vec<String> = original
        .keys()
        .filter(|key| !owned_by_any(key, &known))
        .cloned()
        .collect();

    let flat_errors = validate_fields(&instances, &snapshot);
    let errors = nest_errors(&flat_errors);

    tracing::debug!(
        root = section_root,
        disabled = hidden.len(),
        errors = flat_errors.len(),
        unknown = unknown_fields.len(),
        "prepared submission"
    );

    Submission {
        answers: pruned,
        flat: snapshot,
        disabled: instances
            .iter()
            .zip(&disabled)
            .filter(|(_, hidden)| **hidden)
            .map(|(instance, _)| instance.path.clone())
            .collect(),
        errors,
        flat_errors,
        unknown_fields,
    }
}

fn disabled_paths<'i>(instances: &'i [FieldInstance<'_>], disabled: &[bool]) -> HashSet<&'i str> {
    instances
        .iter()
        .zip(disabled)
        .filter(|(_, hidden)| **hidden)
        .map(|(instance, _)| instance.path.as_str())
        .collect()
}

/// True when `key` is one of `paths` or sits below one of them.
fn owned_by_any(key: &str, paths: &HashSet<&str>) -> bool {
    paths.contains(key)
        || key
            .match_indices('.')
            .any(|(index, _)| paths.contains(&key[..index]))
}

/// Segments of `path` below `root`; empty when `path` is the root itself.
fn relative_segments<'p>(root: &str, path: &'p str) -> Option<Vec<&'p str>> {
    let relative = if root.is_empty() {
        path
    } else if path == root {
        return Some(Vec::new());
    } else {
        path.strip_prefix(root)?.strip_prefix('.')?
    };
    Some(relative.split('.').collect())
}

fn remove_path(value: &mut Value, segments: Vec<&str>) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let parent = parents.iter().try_fold(value, |node, segment| match node {
        Value::Object(map) => map.get_mut(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    });
    match parent {
        Some(Value::Object(map)) => {
            map.shift_remove(*last);
        }
        Some(Value::Array(items)) => {
            if let Some(item) = last.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                *item = Value::Null;
            }
        }
        _ => {}
    }
}
