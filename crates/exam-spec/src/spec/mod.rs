pub mod node;
pub mod primitive;
pub mod section;
pub mod step;

pub use node::{Group, ModelNode, Question};
pub use primitive::{Primitive, PrimitiveConfig, RenderType};
pub use section::Section;
pub use step::{StepDefinition, StepMap};
