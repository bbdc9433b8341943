use super::{follow_up, join, new_section, per_side, steps};
use crate::context::{MuscleGroup, PainType, Region, Site};
use crate::spec::node::ModelNode;
use crate::spec::primitive::Primitive;
use crate::spec::section::Section;
use crate::spec::step::StepDefinition;

const REGIONS: [(Region, MuscleGroup); 3] = [
    (Region::Temporalis, MuscleGroup::Temporalis),
    (Region::Masseter, MuscleGroup::Masseter),
    (Region::Tmj, MuscleGroup::Tmj),
];

/// E9: muscle and TMJ pain with palpation.
pub(super) fn build() -> Section {
    let model = ModelNode::group(per_side(|side| {
        let side_path = join("e9", side);
        ModelNode::group(REGIONS.into_iter().map(|(region, group)| {
            let region_path = join(&side_path, region.as_str());
            let sites = Site::ALL
                .iter()
                .filter(|site| site.muscle_group() == group)
                .map(|site| {
                    let site_path = join(&region_path, site.as_str());
                    (site.as_str(), palpation(&site_path, *site))
                });
            (region.as_str(), ModelNode::group(sites))
        }))
    }));
    new_section(
        "e9",
        "E9 Muscle and TMJ palpation",
        model,
        steps([
            ("e9-left", StepDefinition::wildcard("left")),
            ("e9-right", StepDefinition::wildcard("right")),
        ]),
    )
}

/// Findings at one palpation site. Familiar headache is only asked over
/// the temporalis.
fn palpation(base: &str, site: Site) -> ModelNode {
    let pain = join(base, PainType::Pain.as_str());
    let mut items = vec![
        (
            PainType::Pain.as_str(),
            ModelNode::question(Primitive::yes_no().required()),
        ),
        (PainType::FamiliarPain.as_str(), follow_up(&pain)),
    ];
    if site.muscle_group() == MuscleGroup::Temporalis {
        items.push((PainType::FamiliarHeadache.as_str(), follow_up(&pain)));
    }
    items.push((PainType::ReferredPain.as_str(), follow_up(&pain)));
    ModelNode::group(items)
}
