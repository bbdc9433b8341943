use regex::Regex;
use serde_json::{Map, Value};

use crate::flatten::{ErrorKind, FieldError, FlatAnswers, FlatErrors};
use crate::projection::FieldInstance;
use crate::spec::primitive::{PrimitiveConfig, RenderType};

/// Checks every enabled instance against its primitive's rules. Disabled
/// fields are never reported.
pub fn validate_fields(instances: &[FieldInstance<'_>], answers: &FlatAnswers) -> FlatErrors {
    let mut errors = FlatErrors::new();
    for instance in instances {
        if !instance.is_enabled(answers) {
            continue;
        }
        let value = value_at(instance, answers);
        if let Some(error) = validate_value(instance, value.as_ref()) {
            errors.insert(instance.path.clone(), error);
        }
    }
    errors
}

/// Reads the answer for `instance`. Durations flatten into `path.years` and
/// `path.months`, so they are stitched back together here.
fn value_at(instance: &FieldInstance<'_>, answers: &FlatAnswers) -> Option<Value> {
    if let Some(value) = answers.get(&instance.path) {
        return Some(value.clone());
    }
    if instance.render_type != RenderType::Duration {
        return None;
    }
    let years = answers.get(&format!("{}.years", instance.path));
    let months = answers.get(&format!("{}.months", instance.path));
    if years.is_none() && months.is_none() {
        return None;
    }
    let mut parts = Map::new();
    parts.insert("years".into(), years.cloned().unwrap_or(Value::Null));
    parts.insert("months".into(), months.cloned().unwrap_or(Value::Null));
    Some(Value::Object(parts))
}

fn validate_value(instance: &FieldInstance<'_>, value: Option<&Value>) -> Option<FieldError> {
    let config = instance.config;
    let Some(value) = value.filter(|value| !is_blank(value)) else {
        return config
            .required
            .then(|| FieldError::new(ErrorKind::Required, "answer required"));
    };

    match instance.render_type {
        RenderType::Toggle => (!value.is_boolean())
            .then(|| FieldError::new(ErrorKind::Type, "expected true or false")),
        RenderType::YesNo => match value.as_str() {
            Some("yes" | "no") => None,
            _ => Some(FieldError::new(ErrorKind::Type, "expected \"yes\" or \"no\"")),
        },
        RenderType::Measurement => match value.as_f64() {
            Some(number) => enforce_bounds(config, number),
            None => Some(FieldError::new(ErrorKind::Type, "expected a number")),
        },
        RenderType::Scale => match value.as_f64() {
            Some(number) if number.fract() == 0.0 => enforce_bounds(config, number),
            _ => Some(FieldError::new(ErrorKind::Type, "expected a whole number")),
        },
        RenderType::Enum => match value.as_str() {
            Some(choice) => enforce_option(config, choice),
            None => Some(FieldError::new(ErrorKind::Type, "expected a single choice")),
        },
        RenderType::CheckboxGroup => match value.as_array() {
            Some(choices) => choices.iter().find_map(|choice| match choice.as_str() {
                Some(choice) => enforce_option(config, choice),
                None => Some(FieldError::new(ErrorKind::Type, "expected a list of choices")),
            }),
            None => Some(FieldError::new(ErrorKind::Type, "expected a list of choices")),
        },
        RenderType::Text => match value.as_str() {
            Some(text) => enforce_text(config, text),
            None => Some(FieldError::new(ErrorKind::Type, "expected text")),
        },
        RenderType::Duration => validate_duration(value),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.values().all(Value::is_null),
        _ => false,
    }
}

fn enforce_bounds(config: &PrimitiveConfig, number: f64) -> Option<FieldError> {
    if number < 0.0 && !config.allow_negative {
        return Some(FieldError::new(
            ErrorKind::Min,
            "negative values are not allowed",
        ));
    }
    if let Some(min) = config.min
        && number < min
    {
        return Some(FieldError::new(
            ErrorKind::Min,
            format!("value below minimum {min}"),
        ));
    }
    if let Some(max) = config.max
        && number > max
    {
        return Some(FieldError::new(
            ErrorKind::Max,
            format!("value above maximum {max}"),
        ));
    }
    None
}

fn enforce_option(config: &PrimitiveConfig, choice: &str) -> Option<FieldError> {
    if config.options.iter().any(|option| option == choice) {
        None
    } else {
        Some(FieldError::new(
            ErrorKind::InvalidOption,
            format!("'{choice}' is not an available option"),
        ))
    }
}

fn enforce_text(config: &PrimitiveConfig, text: &str) -> Option<FieldError> {
    if let Some(max_length) = config.max_length
        && text.chars().count() > max_length
    {
        return Some(FieldError::new(
            ErrorKind::MaxLength,
            format!("text longer than {max_length} characters"),
        ));
    }
    if let Some(pattern) = &config.pattern
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return Some(FieldError::new(
            ErrorKind::Pattern,
            "value does not match pattern",
        ));
    }
    None
}

fn validate_duration(value: &Value) -> Option<FieldError> {
    let Some(parts) = value.as_object() else {
        return Some(FieldError::new(
            ErrorKind::Type,
            "expected years and months",
        ));
    };
    let part = |name: &str| match parts.get(name) {
        None | Some(Value::Null) => Some(0),
        Some(value) => value.as_u64(),
    };
    match (part("years"), part("months")) {
        (Some(_), Some(months)) if months > 11 => Some(FieldError::new(
            ErrorKind::Max,
            "months must be between 0 and 11",
        )),
        (Some(_), Some(_)) => None,
        _ => Some(FieldError::new(
            ErrorKind::Type,
            "years and months must be whole non-negative numbers",
        )),
    }
}
