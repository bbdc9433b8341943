use super::{follow_up, join, new_section, per_side, steps};
use crate::context::{MuscleGroup, PainType, Region, Site};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

/// E10: supplemental palpation sites, grouped under other masticatory
/// muscles.
pub(super) fn build() -> Section {
    let region = Region::OtherMast.as_str();
    let model = ModelNode::group(per_side(|side| {
        let region_path = join(&join("e10", side), region);
        let sites = Site::ALL
            .iter()
            .filter(|site| site.muscle_group() == MuscleGroup::Supplemental)
            .map(|site| (site.as_str(), supplemental(&join(&region_path, site.as_str()))));
        ModelNode::group([(region, ModelNode::group(sites))])
    }));
    new_section(
        "e10",
        "E10 Supplemental muscle palpation",
        model,
        steps([
            ("e10-left", StepDefinition::wildcard("left")),
            ("e10-right", StepDefinition::wildcard("right")),
        ]),
    )
}

fn supplemental(base: &str) -> ModelNode {
    let pain = join(base, PainType::Pain.as_str());
    ModelNode::group([
        (
            PainType::Pain.as_str(),
            ModelNode::question(Primitive::yes_no().required()),
        ),
        (PainType::FamiliarPain.as_str(), follow_up(&pain)),
        (PainType::ReferredPain.as_str(), follow_up(&pain)),
        (PainType::SpreadingPain.as_str(), follow_up(&pain)),
    ])
}
