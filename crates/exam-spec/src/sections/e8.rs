use super::{follow_up, join, new_section, per_side, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E8: joint locking observed during the examination.
pub(super) fn build() -> Section {
    let model = ModelNode::group(per_side(|side| {
        let base = join("e8", side);
        ModelNode::group([
            ("closedLocking", locking(&join(&base, "closedLocking"))),
            ("openLocking", locking(&join(&base, "openLocking"))),
        ])
    }));
    new_section(
        "e8",
        "E8 Joint locking",
        model,
        steps([
            ("e8-left", StepDefinition::wildcard("left")),
            ("e8-right", StepDefinition::wildcard("right")),
        ]),
    )
}

fn locking(base: &str) -> ModelNode {
    let observed = join(base, "observed");
    ModelNode::group([
        ("observed", ModelNode::question(Primitive::yes_no().required())),
        ("reducedByPatient", follow_up(&observed)),
        ("reducedByExaminer", follow_up(&observed)),
    ])
}
