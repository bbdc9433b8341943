use super::e6::noises;
use super::{join, new_section, per_side, steps};
use crate::spec::node::ModelNode;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E7: TMJ noises during lateral and protrusive movements.
pub(super) fn build() -> Section {
    new_section(
        "e7",
        "E7 TMJ noises during lateral and protrusive movements",
        ModelNode::group(per_side(|side| {
            noises(&join("e7", side), &["lateral", "protrusive"])
        })),
        steps([
            ("e7-left", StepDefinition::wildcard("left")),
            ("e7-right", StepDefinition::wildcard("right")),
        ]),
    )
}
