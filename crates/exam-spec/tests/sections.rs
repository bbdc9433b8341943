use std::collections::HashSet;

use serde_json::json;

use exam_spec::{
    ErrorKind, PainType, RenderType, Side, answers_schema, flatten, section, sections,
};

#[test]
fn registry_lists_every_section_once() {
    let ids: Vec<&str> = sections().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "sq", "e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9", "e10", "e11", "phq4"
        ]
    );
    assert!(section("e12").is_none());
    assert_eq!(section("e9").map(|s| s.title.as_str()), Some("E9 Muscle and TMJ palpation"));
}

#[test]
fn every_section_is_well_formed() {
    for section in sections() {
        assert_eq!(section.root, section.id);
        let instances = section.instances();
        assert!(!instances.is_empty(), "{} has no fields", section.id);

        let paths: HashSet<&str> = instances.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths.len(), instances.len(), "{} repeats a path", section.id);

        let defaults: HashSet<String> = flatten(&section.defaults(), &section.root)
            .keys()
            .cloned()
            .collect();
        let expected: HashSet<String> = paths.iter().map(|p| p.to_string()).collect();
        assert_eq!(defaults, expected, "{} defaults drift from its fields", section.id);

        assert_eq!(section.validate_steps(), Ok(()), "{}", section.id);
        assert!(
            section.context_conflicts().is_empty(),
            "{}: {:?}",
            section.id,
            section.context_conflicts()
        );
        assert!(section.step_names().next().is_some(), "{} has no steps", section.id);
    }
}

#[test]
fn conditions_reference_fields_of_the_same_section() {
    for section in sections() {
        let instances = section.instances();
        let paths: HashSet<&str> = instances.iter().map(|i| i.path.as_str()).collect();
        for instance in &instances {
            for condition in instance.enable_when() {
                assert!(
                    paths.contains(condition.field_id.as_str()),
                    "{} depends on unknown {}",
                    instance.path,
                    condition.field_id
                );
            }
        }
    }
}

#[test]
fn side_steps_split_palpation_evenly() {
    let e9 = section("e9").unwrap();
    let total = e9.instances().len();
    let left = e9.step("e9-left").unwrap();
    let right = e9.step("e9-right").unwrap();
    assert_eq!(left.len() + right.len(), total);
    assert_eq!(left.len(), right.len());
    assert!(left.iter().all(|i| i.context.side == Some(Side::Left)));
    assert!(right.iter().all(|i| i.path.starts_with("e9.right.")));
    assert!(matches!(
        e9.step("e9-both"),
        Err(exam_spec::StepError::UnknownStep(_))
    ));
}

#[test]
fn pain_interview_carries_full_context() {
    let e4 = section("e4").unwrap();
    let instances = e4.instances();
    let headache = instances
        .iter()
        .find(|i| i.path == "e4.maxAssisted.right.temporalis.familiarHeadache")
        .unwrap();
    let context = serde_json::to_value(headache.context).unwrap();
    assert_eq!(
        context,
        json!({ "side": "right", "region": "temporalis", "painType": "familiarHeadache" })
    );
    assert!(
        instances
            .iter()
            .all(|i| !i.path.ends_with("masseter.familiarHeadache"))
    );

    let unassisted = e4.step("e4-max-unassisted").unwrap();
    assert_eq!(unassisted[0].path, "e4.maxUnassisted.measurement");
    assert_eq!(unassisted[0].render_type, RenderType::Measurement);
    assert!(unassisted.iter().all(|i| i.path.starts_with("e4.maxUnassisted.")));
}

#[test]
fn palpation_sites_fill_site_and_group() {
    let e9 = section("e9").unwrap();
    let instances = e9.instances();
    let tmj = instances
        .iter()
        .find(|i| i.path == "e9.left.tmj.tmjAroundLateralPole.referredPain")
        .unwrap();
    assert_eq!(
        serde_json::to_value(tmj.context).unwrap(),
        json!({
            "side": "left",
            "region": "tmj",
            "site": "tmjAroundLateralPole",
            "muscleGroup": "tmj",
            "painType": "referredPain"
        })
    );

    let e10 = section("e10").unwrap();
    let spreading: Vec<_> = e10
        .instances()
        .into_iter()
        .filter(|i| i.context.pain_type == Some(PainType::SpreadingPain))
        .collect();
    assert_eq!(spreading.len(), 8);
}

#[test]
fn defaults_start_toggles_false() {
    let e4 = section("e4").unwrap();
    let defaults = e4.defaults();
    assert_eq!(defaults["maxAssisted"]["terminated"], json!(false));
    assert_eq!(defaults["maxUnassisted"]["measurement"], json!(null));
    assert!(defaults["maxUnassisted"].get("terminated").is_none());
}

#[test]
fn submitting_defaults_reports_required_fields() {
    let phq4 = section("phq4").unwrap();
    let submission = phq4.submit(&phq4.defaults());
    assert_eq!(submission.flat_errors.len(), 4);
    assert!(
        submission
            .flat_errors
            .values()
            .all(|e| e.kind == ErrorKind::Required)
    );

    let answered = phq4.submit(&json!({
        "nervous": 0,
        "worrying": 1,
        "littleInterest": 3,
        "down": 2
    }));
    assert!(answered.is_valid());
}

#[test]
fn schema_describes_answer_shape() {
    let e2 = section("e2").unwrap();
    let schema = answers_schema(e2);
    assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");
    assert_eq!(schema["type"], "object");
    let properties = schema["properties"].as_object().unwrap();
    let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "referenceTooth",
            "referenceToothOther",
            "midlineDirection",
            "midlineDeviation",
            "overjet",
            "overlap"
        ]
    );
    assert_eq!(
        properties["referenceTooth"]["enum"],
        json!(["us8", "us9", "other", null])
    );
    assert_eq!(properties["overjet"]["minimum"], json!(-20.0));
    assert_eq!(properties["midlineDeviation"]["minimum"], json!(0.0));

    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(required, vec!["referenceTooth", "midlineDirection"]);

    let phq4 = answers_schema(section("phq4").unwrap());
    assert_eq!(phq4["properties"]["down"]["type"], json!(["integer", "null"]));
    assert_eq!(phq4["properties"]["down"]["maximum"], json!(3.0));
}
