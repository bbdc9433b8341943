use super::{new_section, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

const ITEMS: [&str; 4] = ["nervous", "worrying", "littleInterest", "down"];

const FREQUENCIES: [&str; 4] = [
    "phq4.frequency.notAtAll",
    "phq4.frequency.severalDays",
    "phq4.frequency.moreThanHalf",
    "phq4.frequency.nearlyEveryDay",
];

/// PHQ-4: four items, each rated 0 to 3 over the last two weeks.
pub(super) fn build() -> Section {
    let model = ModelNode::group(ITEMS.into_iter().map(|item| {
        (
            item,
            ModelNode::labelled(
                Primitive::scale(0, 3, FREQUENCIES).required(),
                format!("phq4.{item}"),
            ),
        )
    }));
    new_section(
        "phq4",
        "PHQ-4",
        model,
        steps([("phq4", StepDefinition::paths(ITEMS))]),
    )
}
