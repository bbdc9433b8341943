use super::{new_section, steps};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E11: free-text examiner comments.
pub(super) fn build() -> Section {
    new_section(
        "e11",
        "E11 Examiner comments",
        ModelNode::group([(
            "comments",
            ModelNode::labelled(
                Primitive::text().max_length(2000).placeholder("Comments"),
                "e11.comments",
            ),
        )]),
        steps([("e11", StepDefinition::paths(["comments"]))]),
    )
}
