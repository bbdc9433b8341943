use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Widget family a question renders as. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RenderType {
    /// Boolean toggle; the only kind whose default is `false` instead of `null`.
    Toggle,
    /// `"yes"` / `"no"` radio pair.
    YesNo,
    /// Bounded numeric value, usually millimetres.
    Measurement,
    /// Single choice out of `options`.
    Enum,
    /// Multiple choices out of `options`; the answer is an atomic string array.
    CheckboxGroup,
    /// Free text.
    Text,
    /// Ordinal rating between `min` and `max` with a label key per value.
    Scale,
    /// Composite `{ years, months }` answer.
    Duration,
}

impl RenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderType::Toggle => "toggle",
            RenderType::YesNo => "yesNo",
            RenderType::Measurement => "measurement",
            RenderType::Enum => "enum",
            RenderType::CheckboxGroup => "checkboxGroup",
            RenderType::Text => "text",
            RenderType::Scale => "scale",
            RenderType::Duration => "duration",
        }
    }
}

/// Configuration shared by every primitive kind. Fields that do not apply to a
/// kind are left at their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveConfig {
    #[serde(default)]
    pub required: bool,
    /// Conjunctive enablement conditions; empty means always enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enable_when: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub allow_negative: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Option (or scale value) to label key.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// An answerable value kind plus its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    pub render_type: RenderType,
    #[serde(default)]
    pub config: PrimitiveConfig,
}

impl Primitive {
    fn of(render_type: RenderType) -> Self {
        Self {
            render_type,
            config: PrimitiveConfig::default(),
        }
    }

    pub fn toggle() -> Self {
        Self::of(RenderType::Toggle)
    }

    pub fn yes_no() -> Self {
        Self::of(RenderType::YesNo)
    }

    /// Non-negative measurement in `unit`.
    pub fn measurement(unit: impl Into<String>) -> Self {
        let mut primitive = Self::of(RenderType::Measurement);
        primitive.config.unit = Some(unit.into());
        primitive
    }

    pub fn single_choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut primitive = Self::of(RenderType::Enum);
        primitive.config.options = options.into_iter().map(Into::into).collect();
        primitive
    }

    pub fn checkbox_group<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut primitive = Self::of(RenderType::CheckboxGroup);
        primitive.config.options = options.into_iter().map(Into::into).collect();
        primitive
    }

    pub fn text() -> Self {
        Self::of(RenderType::Text)
    }

    /// Integer rating from `min` to `max` inclusive. Labels are keyed by the
    /// decimal value.
    pub fn scale<I, S>(min: i64, max: i64, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut primitive = Self::of(RenderType::Scale);
        primitive.config.min = Some(min as f64);
        primitive.config.max = Some(max as f64);
        primitive.config.labels = (min..=max)
            .map(|value| value.to_string())
            .zip(labels.into_iter().map(Into::into))
            .collect();
        primitive
    }

    pub fn duration() -> Self {
        Self::of(RenderType::Duration)
    }

    pub fn required(mut self) -> Self {
        self.config.required = true;
        self
    }

    /// Adds a condition; multiple calls are combined with AND.
    pub fn enable_when(mut self, condition: Condition) -> Self {
        self.config.enable_when.push(condition);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.config.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.config.max = Some(max);
        self
    }

    pub fn allow_negative(mut self) -> Self {
        self.config.allow_negative = true;
        self
    }

    pub fn label(mut self, option: impl Into<String>, label_key: impl Into<String>) -> Self {
        self.config.labels.insert(option.into(), label_key.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = Some(placeholder.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = Some(pattern.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = Some(max_length);
        self
    }
}
