use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a wizard step picks its fields out of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StepDefinition {
    /// Section-relative paths, resolved in the listed order.
    Paths(Vec<String>),
    /// A single `"<segment>.*"` pattern.
    Wildcard(String),
}

impl StepDefinition {
    pub fn paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StepDefinition::Paths(paths.into_iter().map(Into::into).collect())
    }

    pub fn wildcard(segment: &str) -> Self {
        StepDefinition::Wildcard(format!("{segment}.*"))
    }
}

/// Step name to definition, in wizard order.
pub type StepMap = IndexMap<String, StepDefinition>;
