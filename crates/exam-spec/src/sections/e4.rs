use super::{movement, movement_paths, new_section, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E4: opening movements with the pain interview after each maximum opening.
pub(super) fn build() -> Section {
    let model = ModelNode::group([
        (
            "painFreeOpening",
            ModelNode::labelled(
                Primitive::measurement("mm").max(100.0).required(),
                "e4.painFreeOpening",
            ),
        ),
        ("maxUnassisted", movement("e4", "maxUnassisted", false)),
        ("maxAssisted", movement("e4", "maxAssisted", true)),
    ]);
    new_section(
        "e4",
        "E4 Opening movements",
        model,
        steps([
            ("e4-pain-free", StepDefinition::paths(["painFreeOpening"])),
            (
                "e4-max-unassisted",
                StepDefinition::Paths(movement_paths("maxUnassisted", false)),
            ),
            (
                "e4-max-assisted",
                StepDefinition::Paths(movement_paths("maxAssisted", true)),
            ),
        ]),
    )
}
