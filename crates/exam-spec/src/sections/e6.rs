use super::{follow_up, join, new_section, per_side, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E6: TMJ noises during opening and closing.
pub(super) fn build() -> Section {
    new_section(
        "e6",
        "E6 TMJ noises during open and close movements",
        ModelNode::group(per_side(|side| noises(&join("e6", side), &["open", "close"]))),
        steps([
            ("e6-left", StepDefinition::wildcard("left")),
            ("e6-right", StepDefinition::wildcard("right")),
        ]),
    )
}

/// Click and crepitus findings for one side. The examiner records each
/// `movement`; the patient's own report of a click unlocks the pain
/// follow-ups.
pub(super) fn noises(base: &str, movements: &[&str]) -> ModelNode {
    let click = join(base, "click");
    let patient = join(&click, "patient");
    let pain_with_click = join(&click, "painWithClick");

    let mut click_items: Vec<(String, ModelNode)> = movements
        .iter()
        .map(|movement| (movement.to_string(), examiner_finding()))
        .collect();
    click_items.push(("patient".into(), examiner_finding()));
    click_items.push(("painWithClick".into(), follow_up(&patient)));
    click_items.push(("familiarPain".into(), follow_up(&pain_with_click)));

    let mut crepitus_items: Vec<(String, ModelNode)> = movements
        .iter()
        .map(|movement| (movement.to_string(), examiner_finding()))
        .collect();
    crepitus_items.push(("patient".into(), examiner_finding()));

    ModelNode::group([
        ("click", ModelNode::group(click_items)),
        ("crepitus", ModelNode::group(crepitus_items)),
    ])
}

fn examiner_finding() -> ModelNode {
    ModelNode::question(Primitive::yes_no().required())
}
