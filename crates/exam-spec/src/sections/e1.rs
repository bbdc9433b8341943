use super::{new_section, per_side, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

const PAIN_LOCATIONS: [&str; 5] = ["none", "temporalis", "otherMast", "nonMast", "tmj"];
const HEADACHE_LOCATIONS: [&str; 3] = ["none", "temporal", "other"];

/// E1: examiner-confirmed pain and headache locations in the last 30 days.
pub(super) fn build() -> Section {
    let model = ModelNode::group(per_side(|side| {
        ModelNode::group([
            (
                "painLocation",
                ModelNode::labelled(
                    Primitive::checkbox_group(PAIN_LOCATIONS).required(),
                    format!("e1.{side}.painLocation"),
                ),
            ),
            (
                "headacheLocation",
                ModelNode::labelled(
                    Primitive::checkbox_group(HEADACHE_LOCATIONS).required(),
                    format!("e1.{side}.headacheLocation"),
                ),
            ),
        ])
    }));
    new_section(
        "e1",
        "E1 Pain and headache location",
        model,
        steps([
            ("e1-left", StepDefinition::wildcard("left")),
            ("e1-right", StepDefinition::wildcard("right")),
        ]),
    )
}
