use super::{new_section, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E3: opening pattern.
pub(super) fn build() -> Section {
    let pattern = Primitive::single_choice([
        "straight",
        "correctedDeviation",
        "uncorrectedToRight",
        "uncorrectedToLeft",
    ])
    .required()
    .label("straight", "e3.pattern.straight")
    .label("correctedDeviation", "e3.pattern.correctedDeviation")
    .label("uncorrectedToRight", "e3.pattern.uncorrectedToRight")
    .label("uncorrectedToLeft", "e3.pattern.uncorrectedToLeft");
    new_section(
        "e3",
        "E3 Opening pattern",
        ModelNode::group([("openingPattern", ModelNode::question(pattern))]),
        steps([("e3", StepDefinition::paths(["openingPattern"]))]),
    )
}
