use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::primitive::Primitive;

/// Leaf of a model tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub primitive: Primitive,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,
}

/// Named children in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Group {
    pub children: IndexMap<String, ModelNode>,
}

/// Declarative description of a section: questions nested in groups.
///
/// Trees are built bottom-up, so they cannot contain cycles, and group keys
/// are map keys, so a key cannot appear twice under one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelNode {
    Question(Question),
    Group(Group),
}

impl ModelNode {
    pub fn question(primitive: Primitive) -> Self {
        ModelNode::Question(Question {
            primitive,
            label_key: None,
        })
    }

    pub fn labelled(primitive: Primitive, label_key: impl Into<String>) -> Self {
        ModelNode::Question(Question {
            primitive,
            label_key: Some(label_key.into()),
        })
    }

    /// Builds a group from `(key, child)` pairs. A repeated key replaces the
    /// earlier child in place.
    pub fn group<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, ModelNode)>,
        K: Into<String>,
    {
        ModelNode::Group(Group {
            children: children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        })
    }

    pub fn empty_group() -> Self {
        ModelNode::Group(Group::default())
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            ModelNode::Group(group) => Some(group),
            ModelNode::Question(_) => None,
        }
    }

    /// Resolves a dot-separated path relative to this node.
    pub fn get(&self, relative_path: &str) -> Option<&ModelNode> {
        if relative_path.is_empty() {
            return Some(self);
        }
        relative_path
            .split('.')
            .try_fold(self, |node, segment| node.as_group()?.children.get(segment))
    }

    /// Number of questions below (or at) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ModelNode::Question(_) => 1,
            ModelNode::Group(group) => group.children.values().map(ModelNode::leaf_count).sum(),
        }
    }
}
