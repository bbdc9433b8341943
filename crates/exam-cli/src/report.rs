use std::fmt::Write;

use exam_spec::{ContextKey, FieldInstance, Section, Submission};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SectionSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub version: &'a str,
    pub fields: usize,
    pub steps: Vec<&'a str>,
}

impl<'a> From<&'a Section> for SectionSummary<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            id: &section.id,
            title: &section.title,
            version: &section.version,
            fields: section.instances().len(),
            steps: section.step_names().collect(),
        }
    }
}

/// One line per section: id, field count, step count, title.
pub fn section_table(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(
            out,
            "{:<6} {:>4} fields {:>3} steps  {}",
            section.id,
            section.instances().len(),
            section.steps.len(),
            section.title
        );
    }
    out
}

/// Path, render type and the context slots that are set.
pub fn instance_lines(instances: &[FieldInstance<'_>]) -> String {
    let mut out = String::new();
    for instance in instances {
        let _ = write!(out, "{}  {}", instance.path, instance.render_type.as_str());
        if instance.config.required {
            out.push_str(" [required]");
        }
        if !instance.enable_when().is_empty() {
            out.push_str(" [conditional]");
        }
        let context = describe_context(instance);
        if !context.is_empty() {
            let _ = write!(out, "  {context}");
        }
        out.push('\n');
    }
    out
}

fn describe_context(instance: &FieldInstance<'_>) -> String {
    ContextKey::ALL
        .iter()
        .filter_map(|key| {
            instance
                .context
                .get(*key)
                .map(|value| format!("{}={}", key.as_str(), value))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn step_lines(section: &Section) -> String {
    let mut out = String::new();
    for name in section.step_names() {
        match section.step(name) {
            Ok(instances) => {
                let _ = writeln!(out, "{name}: {} fields", instances.len());
            }
            Err(err) => {
                let _ = writeln!(out, "{name}: {err}");
            }
        }
    }
    out
}

pub fn submission_summary(section: &Section, submission: &Submission) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Submission for {}: {}",
        section.id,
        if submission.is_valid() { "valid" } else { "invalid" }
    );
    if !submission.disabled.is_empty() {
        let _ = writeln!(out, "Dropped {} disabled field(s)", submission.disabled.len());
    }
    for path in &submission.unknown_fields {
        let _ = writeln!(out, "Unknown field: {path}");
    }
    for (path, error) in &submission.flat_errors {
        let _ = writeln!(out, " - {path}: {}", error.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_lines_show_flags_and_context() {
        let e9 = exam_spec::section("e9").unwrap();
        let left = e9.step("e9-left").unwrap();
        let text = instance_lines(&left[..2]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "e9.left.temporalis.temporalisPosterior.pain  yesNo [required]  \
             side=left region=temporalis site=temporalisPosterior muscleGroup=temporalis painType=pain"
        );
        assert!(lines[1].contains(" [conditional]"));
        assert!(lines[1].ends_with("painType=familiarPain"));
    }

    #[test]
    fn summary_lists_field_errors() {
        let phq4 = exam_spec::section("phq4").unwrap();
        let submission = phq4.submit(&phq4.defaults());
        let text = submission_summary(phq4, &submission);
        assert!(text.starts_with("Submission for phq4: invalid\n"));
        assert!(text.contains(" - phq4.nervous: answer required"));
    }
}
