use serde::Serialize;

use crate::condition::{AnswerSnapshot, Condition};
use crate::context::{Context, ContextKey, enrich_context};
use crate::enablement::is_question_enabled;
use crate::spec::node::{ModelNode, Question};
use crate::spec::primitive::{PrimitiveConfig, RenderType};

/// One addressable question, borrowed from the model it was projected from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInstance<'m> {
    pub path: String,
    pub render_type: RenderType,
    pub context: Context,
    pub config: &'m PrimitiveConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_key: Option<&'m str>,
}

impl<'m> FieldInstance<'m> {
    pub fn enable_when(&self) -> &'m [Condition] {
        &self.config.enable_when
    }

    pub fn is_enabled<A: AnswerSnapshot + ?Sized>(&self, answers: &A) -> bool {
        is_question_enabled(Some(self.enable_when()), answers)
    }
}

/// Flattens `node` into field instances in pre-order, children in insertion
/// order. `root_key` becomes the first path segment.
pub fn instances_from_model<'m>(root_key: &str, node: &'m ModelNode) -> Vec<FieldInstance<'m>> {
    let mut instances = Vec::with_capacity(node.leaf_count());
    let mut path = String::from(root_key);
    collect(node, &mut path, &Context::default(), &mut instances);
    tracing::trace!(root = root_key, count = instances.len(), "projected model");
    instances
}

fn collect<'m>(
    node: &'m ModelNode,
    path: &mut String,
    context: &Context,
    out: &mut Vec<FieldInstance<'m>>,
) {
    match node {
        ModelNode::Question(question) => out.push(instance(question, path, context)),
        ModelNode::Group(group) => {
            for (key, child) in &group.children {
                let len = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                let child_context = enrich_context(context, key);
                collect(child, path, &child_context, out);
                path.truncate(len);
            }
        }
    }
}

fn instance<'m>(question: &'m Question, path: &str, context: &Context) -> FieldInstance<'m> {
    FieldInstance {
        path: path.to_string(),
        render_type: question.primitive.render_type,
        context: *context,
        config: &question.primitive.config,
        label_key: question.label_key.as_deref(),
    }
}

/// A group key that sets a context slot an ancestor already set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConflict {
    pub path: String,
    pub key: ContextKey,
    pub previous: &'static str,
    pub current: &'static str,
}

/// Reports every nested overwrite of a context slot. Projection lets the
/// deeper key win; well-formed sections never rely on that.
pub fn context_conflicts(root_key: &str, node: &ModelNode) -> Vec<ContextConflict> {
    let mut conflicts = Vec::new();
    walk_conflicts(
        node,
        &mut String::from(root_key),
        &Context::default(),
        &mut conflicts,
    );
    conflicts
}

fn walk_conflicts(
    node: &ModelNode,
    path: &mut String,
    context: &Context,
    conflicts: &mut Vec<ContextConflict>,
) {
    let ModelNode::Group(group) = node else {
        return;
    };
    for (key, child) in &group.children {
        let len = path.len();
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
        let child_context = enrich_context(context, key);
        if let Some(slot) = ContextKey::implied_by(key)
            && let (Some(previous), Some(current)) = (context.get(slot), child_context.get(slot))
        {
            conflicts.push(ContextConflict {
                path: path.clone(),
                key: slot,
                previous,
                current,
            });
        }
        walk_conflicts(child, path, &child_context, conflicts);
        path.truncate(len);
    }
}
