#![allow(missing_docs)]

pub mod answers;
pub mod answers_schema;
pub mod condition;
pub mod context;
pub mod defaults;
pub mod enablement;
pub mod error;
pub mod flatten;
pub mod projection;
pub mod sections;
pub mod spec;
pub mod steps;
pub mod submit;
pub mod validate;

pub use answers::{AnswerSet, Meta};
pub use answers_schema::generate as answers_schema;
pub use condition::{AnswerSnapshot, Condition, Operator, evaluate_condition};
pub use context::{Context, ContextKey, MuscleGroup, PainType, Region, Side, Site, enrich_context};
pub use defaults::defaults_from_model;
pub use enablement::{
    ConditionMap, DependencyIndex, EnablementMap, is_question_enabled, is_question_id_enabled,
    resolve_enablement,
};
pub use error::{ExamError, StepError};
pub use flatten::{
    ErrorKind, ErrorTree, FieldError, FlatAnswers, FlatErrors, flatten, flatten_object,
    nest_errors, unflatten, unflatten_like,
};
pub use projection::{ContextConflict, FieldInstance, context_conflicts, instances_from_model};
pub use sections::{section, sections};
pub use spec::{
    Group, ModelNode, Primitive, PrimitiveConfig, Question, RenderType, Section, StepDefinition,
    StepMap,
};
pub use steps::{get_step_instances, validate_steps};
pub use submit::{Submission, prepare_submission};
pub use validate::validate_fields;
