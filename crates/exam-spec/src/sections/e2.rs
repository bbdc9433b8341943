use super::{new_section, steps};
use crate::condition::Condition;
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E2: incisal relationships.
pub(super) fn build() -> Section {
    let model = ModelNode::group([
        (
            "referenceTooth",
            ModelNode::question(Primitive::single_choice(["us8", "us9", "other"]).required()),
        ),
        (
            "referenceToothOther",
            ModelNode::question(
                Primitive::text()
                    .required()
                    .pattern("^[1-4][1-8]$")
                    .max_length(2)
                    .placeholder("FDI number")
                    .enable_when(Condition::equals("e2.referenceTooth", "other")),
            ),
        ),
        (
            "midlineDirection",
            ModelNode::question(Primitive::single_choice(["toRight", "toLeft", "na"]).required()),
        ),
        (
            "midlineDeviation",
            ModelNode::question(
                Primitive::measurement("mm")
                    .max(20.0)
                    .required()
                    .enable_when(Condition::exists("e2.midlineDirection"))
                    .enable_when(Condition::not_equals("e2.midlineDirection", "na")),
            ),
        ),
        (
            "overjet",
            ModelNode::question(
                Primitive::measurement("mm")
                    .allow_negative()
                    .min(-20.0)
                    .max(20.0),
            ),
        ),
        (
            "overlap",
            ModelNode::question(
                Primitive::measurement("mm")
                    .allow_negative()
                    .min(-20.0)
                    .max(20.0),
            ),
        ),
    ]);
    new_section(
        "e2",
        "E2 Incisal relationships",
        model,
        steps([(
            "e2",
            StepDefinition::paths([
                "referenceTooth",
                "referenceToothOther",
                "midlineDirection",
                "midlineDeviation",
                "overjet",
                "overlap",
            ]),
        )]),
    )
}
