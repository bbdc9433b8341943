use super::{follow_up, new_section, steps};
use crate::condition::Condition;
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

const ACTIVITIES: [&str; 4] = ["chewing", "opening", "habits", "otherActivities"];

/// DC/TMD symptom questionnaire.
///
/// Pain (SQ1 to SQ4) and headache (SQ5 to SQ7) follow-ups unlock once the
/// screening question was answered "yes"; SQ4 additionally needs SQ3 to
/// report some pain in the last 30 days.
pub(super) fn build() -> Section {
    let model = ModelNode::group([
        ("sq1", screening("sq.sq1")),
        (
            "sq2",
            ModelNode::labelled(
                Primitive::duration()
                    .required()
                    .enable_when(Condition::equals("sq.sq1", "yes")),
                "sq.sq2",
            ),
        ),
        (
            "sq3",
            ModelNode::labelled(
                Primitive::single_choice(["noPain", "comesAndGoes", "always"])
                    .required()
                    .enable_when(Condition::equals("sq.sq1", "yes")),
                "sq.sq3",
            ),
        ),
        (
            "sq4",
            activities(&[
                Condition::exists("sq.sq3"),
                Condition::not_equals("sq.sq3", "noPain"),
            ]),
        ),
        ("sq5", screening("sq.sq5")),
        (
            "sq6",
            ModelNode::labelled(
                Primitive::duration()
                    .required()
                    .enable_when(Condition::equals("sq.sq5", "yes")),
                "sq.sq6",
            ),
        ),
        ("sq7", activities(&[Condition::equals("sq.sq5", "yes")])),
        ("sq8", screening("sq.sq8")),
        (
            "sq8Side",
            ModelNode::question(
                Primitive::checkbox_group(["left", "right", "unknown"])
                    .required()
                    .enable_when(Condition::equals("sq.sq8", "yes")),
            ),
        ),
        ("sq9", screening("sq.sq9")),
        ("sq10", follow_up("sq.sq9")),
        ("sq11", follow_up("sq.sq9")),
        ("sq12", follow_up("sq.sq11")),
        ("sq13", screening("sq.sq13")),
        ("sq14", follow_up("sq.sq13")),
    ]);

    new_section(
        "sq",
        "DC/TMD Symptom Questionnaire",
        model,
        steps([
            (
                "sq-pain",
                StepDefinition::paths(
                    ["sq1", "sq2", "sq3"]
                        .into_iter()
                        .map(String::from)
                        .chain(ACTIVITIES.iter().map(|activity| format!("sq4.{activity}"))),
                ),
            ),
            (
                "sq-headache",
                StepDefinition::paths(
                    ["sq5", "sq6"]
                        .into_iter()
                        .map(String::from)
                        .chain(ACTIVITIES.iter().map(|activity| format!("sq7.{activity}"))),
                ),
            ),
            ("sq-noises", StepDefinition::paths(["sq8", "sq8Side"])),
            (
                "sq-locking",
                StepDefinition::paths(["sq9", "sq10", "sq11", "sq12", "sq13", "sq14"]),
            ),
        ]),
    )
}

/// Required yes/no question that gates later items.
fn screening(label_key: &str) -> ModelNode {
    ModelNode::labelled(Primitive::yes_no().required(), label_key)
}

/// "Did any of these activities change the pain?" items, all sharing the
/// same gate.
fn activities(gate: &[Condition]) -> ModelNode {
    ModelNode::group(ACTIVITIES.into_iter().map(|activity| {
        let primitive = gate
            .iter()
            .cloned()
            .fold(Primitive::yes_no().required(), Primitive::enable_when);
        (activity, ModelNode::question(primitive))
    }))
}
