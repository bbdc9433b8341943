use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::{Value, json};

fn exam_forms() -> Command {
    let mut cmd = Command::cargo_bin("exam-forms").unwrap();
    cmd.env_remove("EXAM_FORMS_LOG")
        .env_remove("EXAM_FORMS_OUTPUT_DIR");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn sections_json_lists_catalog() {
    let output = exam_forms()
        .args(["sections", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let sections = stdout_json(&output);
    let ids: Vec<&str> = sections
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["id"].as_str())
        .collect();
    assert!(ids.contains(&"e9"));
    assert!(ids.contains(&"phq4"));
    let e9 = sections
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "e9")
        .unwrap();
    assert_eq!(e9["steps"], json!(["e9-left", "e9-right"]));
}

#[test]
fn instances_for_step_are_limited_to_that_side() {
    let output = exam_forms()
        .args(["instances", "--section", "e1", "--step", "e1-right", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let instances = stdout_json(&output);
    let paths: Vec<&str> = instances
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["path"].as_str())
        .collect();
    assert_eq!(paths, vec!["e1.right.painLocation", "e1.right.headacheLocation"]);
    assert_eq!(instances[0]["context"], json!({ "side": "right" }));
    assert_eq!(instances[0]["renderType"], "checkboxGroup");
}

#[test]
fn unknown_section_and_step_fail() {
    let output = exam_forms()
        .args(["defaults", "--section", "e42"])
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stderr).contains("section 'e42' is not available"));

    let output = exam_forms()
        .args(["instances", "--section", "e9", "--step", "e9-both"])
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown step 'e9-both'"));
}

#[test]
fn steps_check_passes_for_builtin_sections() {
    exam_forms()
        .args(["steps", "--section", "e4", "--check"])
        .assert()
        .success();
}

#[test]
fn enablement_reflects_answers() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("sq.json");
    answers
        .write_str(r#"{ "sq1": "yes", "sq3": "noPain", "sq5": "no" }"#)
        .unwrap();

    let output = exam_forms()
        .args(["enablement", "--section", "sq", "--answers"])
        .arg(answers.path())
        .assert()
        .success()
        .get_output()
        .clone();
    let map = stdout_json(&output);
    assert_eq!(map["sq.sq2"], true);
    assert_eq!(map["sq.sq4.chewing"], false);
    assert_eq!(map["sq.sq6"], false);
    assert_eq!(map["sq.sq1"], true);
}

#[test]
fn submit_writes_answer_set_under_output_dir() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("phq4.json");
    answers
        .write_str(r#"{ "nervous": 1, "worrying": 0, "littleInterest": 2, "down": 3 }"#)
        .unwrap();
    let out_dir = temp.child("out");

    exam_forms()
        .env("EXAM_FORMS_OUTPUT_DIR", out_dir.path())
        .args(["submit", "--section", "phq4", "--out", "phq4.answers.json", "--answers"])
        .arg(answers.path())
        .assert()
        .success();

    let written = out_dir.child("phq4.answers.json");
    assert!(written.path().exists());
    let set: Value =
        serde_json::from_str(&std::fs::read_to_string(written.path()).unwrap()).unwrap();
    assert_eq!(set["sectionId"], "phq4");
    assert_eq!(set["answers"]["down"], 3);
    assert!(set.get("meta").is_none());
}

#[test]
fn submit_cbor_round_trips() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("e11.json");
    answers.write_str(r#"{ "comments": "no findings" }"#).unwrap();
    let out = temp.child("e11.cbor");

    exam_forms()
        .args(["submit", "--section", "e11", "--cbor", "--out"])
        .arg(out.path())
        .arg("--answers")
        .arg(answers.path())
        .assert()
        .success();

    let bytes = std::fs::read(out.path()).unwrap();
    let set = exam_spec::AnswerSet::from_cbor(&bytes).unwrap();
    assert_eq!(set.answers, json!({ "comments": "no findings" }));
}

#[test]
fn invalid_submission_prints_nested_errors() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("e3.json");
    answers.write_str(r#"{ "openingPattern": "zigzag" }"#).unwrap();

    let output = exam_forms()
        .args(["submit", "--section", "e3", "--answers"])
        .arg(answers.path())
        .assert()
        .failure()
        .get_output()
        .clone();
    let errors = stdout_json(&output);
    assert_eq!(errors["e3"]["openingPattern"]["type"], "option");
    assert!(String::from_utf8_lossy(&output.stderr).contains("submission is invalid"));
}

#[test]
fn schema_for_section_and_model() {
    let output = exam_forms()
        .args(["schema", "--section", "e11"])
        .assert()
        .success()
        .get_output()
        .clone();
    let schema = stdout_json(&output);
    assert_eq!(schema["properties"]["comments"]["maxLength"], 2000);

    let output = exam_forms()
        .args(["schema", "--model"])
        .assert()
        .success()
        .get_output()
        .clone();
    let schema = stdout_json(&output);
    assert_eq!(schema["title"], "Section");
}
