use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::defaults_from_model;
use crate::error::StepError;
use crate::projection::{ContextConflict, FieldInstance, context_conflicts, instances_from_model};
use crate::spec::node::ModelNode;
use crate::spec::step::StepMap;
use crate::steps::{get_step_instances, validate_steps};
use crate::submit::{Submission, prepare_submission};

/// A named form: one model tree projected under `root`, plus its wizard steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub version: String,
    /// First path segment of every field in the section.
    pub root: String,
    pub model: ModelNode,
    #[serde(default)]
    pub steps: StepMap,
}

impl Section {
    pub fn instances(&self) -> Vec<FieldInstance<'_>> {
        instances_from_model(&self.root, &self.model)
    }

    pub fn defaults(&self) -> Value {
        defaults_from_model(&self.model)
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    /// Fields shown by step `name`, in step order.
    pub fn step(&self, name: &str) -> Result<Vec<FieldInstance<'_>>, StepError> {
        let instances = self.instances();
        let selected = get_step_instances(&instances, &self.steps, name, &self.root)?;
        Ok(selected.into_iter().cloned().collect())
    }

    pub fn validate_steps(&self) -> Result<(), StepError> {
        validate_steps(&self.instances(), &self.steps, &self.root)
    }

    pub fn context_conflicts(&self) -> Vec<ContextConflict> {
        context_conflicts(&self.root, &self.model)
    }

    /// `answers` is the section's answer tree, without the root key.
    pub fn submit(&self, answers: &Value) -> Submission {
        prepare_submission(&self.root, &self.model, answers)
    }
}
