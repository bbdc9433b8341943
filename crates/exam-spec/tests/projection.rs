use std::borrow::Cow;
use std::collections::HashSet;

use serde_json::json;

use exam_spec::{
    Context, ContextKey, ModelNode, MuscleGroup, PainType, Primitive, Region, RenderType, Side,
    Site, context_conflicts, defaults_from_model, enrich_context, flatten, instances_from_model,
};

fn side_region_pain() -> ModelNode {
    ModelNode::group([(
        "left",
        ModelNode::group([(
            "temporalis",
            ModelNode::group([("pain", ModelNode::question(Primitive::yes_no()))]),
        )]),
    )])
}

fn mixed_model() -> ModelNode {
    ModelNode::group([
        ("flag", ModelNode::question(Primitive::toggle())),
        (
            "left",
            ModelNode::group([
                ("note", ModelNode::question(Primitive::text().required())),
                (
                    "masseter",
                    ModelNode::group([(
                        "masseterBody",
                        ModelNode::group([
                            ("pain", ModelNode::question(Primitive::yes_no())),
                            ("familiarPain", ModelNode::question(Primitive::yes_no())),
                        ]),
                    )]),
                ),
            ]),
        ),
        ("empty", ModelNode::empty_group()),
        ("opening", ModelNode::question(Primitive::measurement("mm"))),
    ])
}

#[test]
fn paths_follow_preorder_insertion_order() {
    let model = mixed_model();
    let paths: Vec<String> = instances_from_model("s", &model)
        .into_iter()
        .map(|instance| instance.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "s.flag",
            "s.left.note",
            "s.left.masseter.masseterBody.pain",
            "s.left.masseter.masseterBody.familiarPain",
            "s.opening",
        ]
    );
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len());
}

#[test]
fn context_accumulates_exactly_the_recognized_keys() {
    let model = side_region_pain();
    let instances = instances_from_model("e9", &model);
    assert_eq!(instances.len(), 1);
    assert_eq!(
        instances[0].context,
        Context {
            side: Some(Side::Left),
            region: Some(Region::Temporalis),
            pain_type: Some(PainType::Pain),
            ..Context::default()
        }
    );
    assert_eq!(
        serde_json::to_value(instances[0].context).unwrap(),
        json!({ "side": "left", "region": "temporalis", "painType": "pain" })
    );
}

#[test]
fn site_keys_fill_site_and_muscle_group() {
    let model = mixed_model();
    let instances = instances_from_model("s", &model);
    let pain = instances
        .iter()
        .find(|instance| instance.path == "s.left.masseter.masseterBody.pain")
        .unwrap();
    assert_eq!(pain.context.site, Some(Site::MasseterBody));
    assert_eq!(pain.context.muscle_group, Some(MuscleGroup::Masseter));
    assert_eq!(pain.context.region, Some(Region::Masseter));
    assert_eq!(pain.render_type, RenderType::YesNo);

    let flag = &instances[0];
    assert!(flag.context.is_empty());
    assert_eq!(flag.render_type, RenderType::Toggle);
}

#[test]
fn unknown_key_returns_the_same_reference() {
    let context = Context {
        side: Some(Side::Right),
        ..Context::default()
    };
    match enrich_context(&context, "maxUnassisted") {
        Cow::Borrowed(same) => assert!(std::ptr::eq(same, &context)),
        Cow::Owned(_) => panic!("unknown key must not allocate a new context"),
    }
}

#[test]
fn deeper_key_overwrites_and_is_reported() {
    let model = ModelNode::group([(
        "temporalis",
        ModelNode::group([(
            "masseter",
            ModelNode::group([("pain", ModelNode::question(Primitive::yes_no()))]),
        )]),
    )]);
    let instances = instances_from_model("x", &model);
    assert_eq!(instances[0].context.region, Some(Region::Masseter));

    let conflicts = context_conflicts("x", &model);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].path, "x.temporalis.masseter");
    assert_eq!(conflicts[0].key, ContextKey::Region);
    assert_eq!(conflicts[0].previous, "temporalis");
    assert_eq!(conflicts[0].current, "masseter");
    assert!(context_conflicts("e9", &side_region_pain()).is_empty());
}

#[test]
fn instances_borrow_config_from_the_model() {
    let model = mixed_model();
    let instances = instances_from_model("s", &model);
    let note = &instances[1];
    assert!(note.config.required);
    let ModelNode::Question(question) = model.get("left.note").unwrap() else {
        panic!("expected a question");
    };
    assert!(std::ptr::eq(note.config, &question.primitive.config));
}

#[test]
fn empty_group_projects_nothing() {
    assert!(instances_from_model("s", &ModelNode::empty_group()).is_empty());
}

#[test]
fn defaults_are_congruent_with_instances() {
    let model = mixed_model();
    let defaults = defaults_from_model(&model);
    assert_eq!(defaults["flag"], json!(false));
    assert_eq!(defaults["left"]["note"], json!(null));
    assert_eq!(defaults["empty"], json!({}));

    let default_paths: HashSet<String> = flatten(&defaults, "s").keys().cloned().collect();
    let instance_paths: HashSet<String> = instances_from_model("s", &model)
        .into_iter()
        .map(|instance| instance.path)
        .collect();
    assert_eq!(default_paths, instance_paths);
}

#[test]
fn defaults_ignore_required() {
    let model = ModelNode::group([
        ("a", ModelNode::question(Primitive::toggle().required())),
        ("b", ModelNode::question(Primitive::yes_no().required())),
    ]);
    assert_eq!(defaults_from_model(&model), json!({ "a": false, "b": null }));
}
