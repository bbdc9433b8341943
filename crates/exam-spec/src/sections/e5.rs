use super::{movement, movement_paths, new_section, steps};
use crate::spec::node::ModelNode;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

const MOVEMENTS: [&str; 3] = ["rightLateral", "leftLateral", "protrusive"];

/// E5: lateral and protrusive movements.
pub(super) fn build() -> Section {
    let model = ModelNode::group(
        MOVEMENTS
            .into_iter()
            .map(|key| (key, movement("e5", key, false))),
    );
    new_section(
        "e5",
        "E5 Lateral and protrusive movements",
        model,
        steps(
            MOVEMENTS
                .into_iter()
                .map(|key| (format!("e5-{key}"), StepDefinition::Paths(movement_paths(key, false)))),
        ),
    )
}
