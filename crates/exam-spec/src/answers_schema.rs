use serde_json::{Map, Value, json};

use crate::spec::node::{ModelNode, Question};
use crate::spec::primitive::RenderType;
use crate::spec::section::Section;

/// JSON Schema (draft 2020-12) describing a section's answer tree.
pub fn generate(section: &Section) -> Value {
    let mut schema = node_schema(&section.model);
    if let Value::Object(map) = &mut schema {
        map.insert(
            "$schema".into(),
            json!("https://json-schema.org/draft/2020-12/schema"),
        );
        map.insert("$id".into(), json!(format!("exam:{}", section.id)));
        map.insert("title".into(), json!(section.title));
    }
    schema
}

fn node_schema(node: &ModelNode) -> Value {
    match node {
        ModelNode::Question(question) => question_schema(question),
        ModelNode::Group(group) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (key, child) in &group.children {
                properties.insert(key.clone(), node_schema(child));
                let always_present = match child {
                    ModelNode::Group(_) => true,
                    ModelNode::Question(question) => {
                        let config = &question.primitive.config;
                        config.required && config.enable_when.is_empty()
                    }
                };
                if always_present {
                    required.push(Value::String(key.clone()));
                }
            }
            let mut schema = Map::new();
            schema.insert("type".into(), json!("object"));
            schema.insert("properties".into(), Value::Object(properties));
            if !required.is_empty() {
                schema.insert("required".into(), Value::Array(required));
            }
            schema.insert("additionalProperties".into(), Value::Bool(false));
            Value::Object(schema)
        }
    }
}

fn question_schema(question: &Question) -> Value {
    let config = &question.primitive.config;
    let mut schema = match question.primitive.render_type {
        RenderType::Toggle => json!({ "type": "boolean" }),
        RenderType::YesNo => json!({ "type": ["string", "null"], "enum": ["yes", "no", null] }),
        RenderType::Measurement => {
            let minimum = match config.min {
                Some(min) => Some(min),
                None if !config.allow_negative => Some(0.0),
                None => None,
            };
            bounded("number", minimum, config.max)
        }
        RenderType::Scale => bounded("integer", config.min, config.max),
        RenderType::Enum => {
            let mut choices: Vec<Value> = config.options.iter().map(|o| json!(o)).collect();
            choices.push(Value::Null);
            json!({ "type": ["string", "null"], "enum": choices })
        }
        RenderType::CheckboxGroup => json!({
            "type": ["array", "null"],
            "items": { "type": "string", "enum": config.options },
            "uniqueItems": true
        }),
        RenderType::Text => {
            let mut schema = json!({ "type": ["string", "null"] });
            if let Some(pattern) = &config.pattern {
                schema["pattern"] = json!(pattern);
            }
            if let Some(max_length) = config.max_length {
                schema["maxLength"] = json!(max_length);
            }
            schema
        }
        RenderType::Duration => json!({
            "type": ["object", "null"],
            "properties": {
                "years": { "type": ["integer", "null"], "minimum": 0 },
                "months": { "type": ["integer", "null"], "minimum": 0, "maximum": 11 }
            },
            "additionalProperties": false
        }),
    };
    if let Some(unit) = &config.unit {
        schema["description"] = json!(format!("Unit: {unit}"));
    }
    if let Some(label_key) = &question.label_key {
        schema["title"] = json!(label_key);
    }
    schema
}

fn bounded(kind: &str, minimum: Option<f64>, maximum: Option<f64>) -> Value {
    let mut schema = json!({ "type": [kind, "null"] });
    if let Some(minimum) = minimum {
        schema["minimum"] = json!(minimum);
    }
    if let Some(maximum) = maximum {
        schema["maximum"] = json!(maximum);
    }
    schema
}
