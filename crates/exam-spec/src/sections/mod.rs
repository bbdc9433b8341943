//! Built-in DC/TMD sections: examination items E1 to E11, the symptom
//! questionnaire and PHQ-4.

use std::sync::LazyLock;

use crate::condition::Condition;
use crate::context::{PainType, Region};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::{StepDefinition, StepMap};

mod e1;
mod e10;
mod e11;
mod e2;
mod e3;
mod e4;
mod e5;
mod e6;
mod e7;
mod e8;
mod e9;
mod phq4;
mod sq;

pub const SPEC_VERSION: &str = "1.0.0";

static SECTIONS: LazyLock<Vec<Section>> = LazyLock::new(|| {
    vec![
        sq::build(),
        e1::build(),
        e2::build(),
        e3::build(),
        e4::build(),
        e5::build(),
        e6::build(),
        e7::build(),
        e8::build(),
        e9::build(),
        e10::build(),
        e11::build(),
        phq4::build(),
    ]
});

/// Every built-in section, questionnaire first, then E1 to E11, then PHQ-4.
pub fn sections() -> &'static [Section] {
    &SECTIONS
}

pub fn section(id: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|section| section.id == id)
}

fn new_section(id: &str, title: &str, model: ModelNode, steps: StepMap) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        version: SPEC_VERSION.to_string(),
        root: id.to_string(),
        model,
        steps,
    }
}

fn steps<I, S>(entries: I) -> StepMap
where
    I: IntoIterator<Item = (S, StepDefinition)>,
    S: Into<String>,
{
    entries
        .into_iter()
        .map(|(name, definition)| (name.into(), definition))
        .collect()
}

fn join(base: &str, key: &str) -> String {
    format!("{base}.{key}")
}

/// `left` and `right` copies of the group `build` returns for each side.
fn per_side(build: impl Fn(&str) -> ModelNode) -> Vec<(&'static str, ModelNode)> {
    ["left", "right"]
        .into_iter()
        .map(|side| (side, build(side)))
        .collect()
}

/// Yes/no follow-up shown only after `parent` was answered "yes".
fn follow_up(parent: &str) -> ModelNode {
    ModelNode::question(Primitive::yes_no().enable_when(Condition::equals(parent, "yes")))
}

/// Pain reported during a movement, asked per region.
///
/// `base` is the full path of the group this interview lands under, e.g.
/// `e4.maxUnassisted.left`. Familiar pain (and familiar headache for the
/// temporalis) are only asked once pain was confirmed.
fn pain_interview(base: &str) -> ModelNode {
    ModelNode::group(Region::ALL.iter().map(|region| {
        let region_path = join(base, region.as_str());
        let pain_path = join(&region_path, PainType::Pain.as_str());
        let mut items = vec![(
            PainType::Pain.as_str(),
            ModelNode::question(Primitive::yes_no().required()),
        )];
        items.push((PainType::FamiliarPain.as_str(), follow_up(&pain_path)));
        if *region == Region::Temporalis {
            items.push((PainType::FamiliarHeadache.as_str(), follow_up(&pain_path)));
        }
        (region.as_str(), ModelNode::group(items))
    }))
}

/// Section-relative paths of every question `pain_interview` creates under
/// `relative`.
fn pain_interview_paths(relative: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for region in Region::ALL {
        let region_path = join(relative, region.as_str());
        paths.push(join(&region_path, PainType::Pain.as_str()));
        paths.push(join(&region_path, PainType::FamiliarPain.as_str()));
        if *region == Region::Temporalis {
            paths.push(join(&region_path, PainType::FamiliarHeadache.as_str()));
        }
    }
    paths
}

/// Opening-style movement: a measurement, then the pain interview per side.
fn movement(root: &str, key: &str, with_terminated: bool) -> ModelNode {
    let base = join(root, key);
    let mut items = vec![(
        "measurement".to_string(),
        ModelNode::labelled(
            Primitive::measurement("mm").max(100.0).required(),
            join(&base, "measurement"),
        ),
    )];
    if with_terminated {
        items.push(("terminated".to_string(), ModelNode::question(Primitive::toggle())));
    }
    for (side, interview) in per_side(|side| pain_interview(&join(&base, side))) {
        items.push((side.to_string(), interview));
    }
    ModelNode::group(items)
}

fn movement_paths(key: &str, with_terminated: bool) -> Vec<String> {
    let mut paths = vec![join(key, "measurement")];
    if with_terminated {
        paths.push(join(key, "terminated"));
    }
    for side in ["left", "right"] {
        paths.extend(pain_interview_paths(&join(key, side)));
    }
    paths
}
