use serde_json::{Map, Value};

use crate::spec::node::ModelNode;
use crate::spec::primitive::RenderType;

/// Zero-value answer tree shaped like `node`. Toggles start `false`, every
/// other kind starts `null`; `required` plays no part.
pub fn defaults_from_model(node: &ModelNode) -> Value {
    match node {
        ModelNode::Question(question) => match question.primitive.render_type {
            RenderType::Toggle => Value::Bool(false),
            RenderType::YesNo
            | RenderType::Measurement
            | RenderType::Enum
            | RenderType::CheckboxGroup
            | RenderType::Text
            | RenderType::Scale
            | RenderType::Duration => Value::Null,
        },
        ModelNode::Group(group) => Value::Object(
            group
                .children
                .iter()
                .map(|(key, child)| (key.clone(), defaults_from_model(child)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
