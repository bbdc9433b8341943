mod report;

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use exam_spec::{ExamError, Section, flatten, resolve_enablement};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const LOG_ENV: &str = "EXAM_FORMS_LOG";
const OUTPUT_DIR_ENV: &str = "EXAM_FORMS_OUTPUT_DIR";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "DC/TMD examination form tooling",
    long_about = "Inspects the built-in DC/TMD sections and checks answer files against them"
)]
struct Cli {
    /// Log engine decisions at debug level (overrides EXAM_FORMS_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in sections.
    Sections {
        #[arg(long)]
        json: bool,
    },
    /// Print the fields a section projects to.
    Instances {
        #[arg(long, value_name = "SECTION")]
        section: String,
        /// Only the fields of this wizard step.
        #[arg(long, value_name = "NAME")]
        step: Option<String>,
        /// Emit JSON instead of one line per field.
        #[arg(long)]
        json: bool,
    },
    /// List a section's wizard steps.
    Steps {
        #[arg(long, value_name = "SECTION")]
        section: String,
        /// Fail unless every step resolves to at least one field.
        #[arg(long)]
        check: bool,
    },
    /// Print the default answer tree of a section.
    Defaults {
        #[arg(long, value_name = "SECTION")]
        section: String,
    },
    /// Evaluate which fields are enabled for an answers file.
    Enablement {
        #[arg(long, value_name = "SECTION")]
        section: String,
        /// JSON answer tree for the section (without the section key).
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Filter and validate an answers file, then emit the answer set.
    Submit {
        #[arg(long, value_name = "SECTION")]
        section: String,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Write the answer set here (relative paths resolve against EXAM_FORMS_OUTPUT_DIR).
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Encode the written answer set as CBOR.
        #[arg(long, requires = "out")]
        cbor: bool,
    },
    /// Print a JSON Schema for a section's answers, or for the section model itself.
    Schema {
        #[arg(
            long,
            value_name = "SECTION",
            conflicts_with = "model",
            required_unless_present = "model"
        )]
        section: Option<String>,
        #[arg(long)]
        model: bool,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    init_tracing(cli.verbose)?;
    match cli.command {
        Command::Sections { json } => run_sections(json),
        Command::Instances {
            section,
            step,
            json,
        } => run_instances(&section, step.as_deref(), json),
        Command::Steps { section, check } => run_steps(&section, check),
        Command::Defaults { section } => run_defaults(&section),
        Command::Enablement { section, answers } => run_enablement(&section, &answers),
        Command::Submit {
            section,
            answers,
            out,
            cbor,
        } => run_submit(&section, &answers, out, cbor),
        Command::Schema { section, model } => run_schema(section.as_deref(), model),
    }
}

fn init_tracing(verbose: bool) -> CliResult<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn find_section(id: &str) -> Result<&'static Section, ExamError> {
    exam_spec::section(id).ok_or_else(|| ExamError::UnknownSection(id.to_string()))
}

fn read_answers(path: &Path) -> CliResult<Value> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("cannot read answers '{}': {err}", path.display()))?;
    let answers: Value = serde_json::from_str(&contents)?;
    if !answers.is_object() {
        return Err(format!("answers '{}' must be a JSON object", path.display()).into());
    }
    Ok(answers)
}

fn run_sections(json: bool) -> CliResult<()> {
    let sections = exam_spec::sections();
    if json {
        let summaries: Vec<_> = sections.iter().map(report::SectionSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", report::section_table(sections));
    }
    Ok(())
}

fn run_instances(section_id: &str, step: Option<&str>, json: bool) -> CliResult<()> {
    let section = find_section(section_id)?;
    let instances = match step {
        Some(name) => section.step(name)?,
        None => section.instances(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&instances)?);
    } else {
        print!("{}", report::instance_lines(&instances));
    }
    Ok(())
}

fn run_steps(section_id: &str, check: bool) -> CliResult<()> {
    let section = find_section(section_id)?;
    if check {
        section.validate_steps()?;
    }
    print!("{}", report::step_lines(section));
    Ok(())
}

fn run_defaults(section_id: &str) -> CliResult<()> {
    let section = find_section(section_id)?;
    println!("{}", serde_json::to_string_pretty(&section.defaults())?);
    Ok(())
}

fn run_enablement(section_id: &str, answers_path: &Path) -> CliResult<()> {
    let section = find_section(section_id)?;
    let answers = read_answers(answers_path)?;
    let flat = flatten(&answers, &section.root);
    let enablement = resolve_enablement(&section.instances(), &flat);
    println!("{}", serde_json::to_string_pretty(&enablement)?);
    Ok(())
}

fn run_submit(
    section_id: &str,
    answers_path: &Path,
    out: Option<PathBuf>,
    cbor: bool,
) -> CliResult<()> {
    let section = find_section(section_id)?;
    let answers = read_answers(answers_path)?;
    let submission = section.submit(&answers);
    eprint!("{}", report::submission_summary(section, &submission));

    if !submission.is_valid() {
        println!("{}", serde_json::to_string_pretty(&submission.errors)?);
        return Err("submission is invalid".into());
    }

    let answer_set = submission.into_answer_set(&section.id, &section.version);
    match out {
        Some(path) => {
            let path = resolve_output_path(path, env::var_os(OUTPUT_DIR_ENV));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let bytes = if cbor {
                answer_set.to_cbor().map_err(ExamError::from)?
            } else {
                answer_set.to_json_pretty()?.into_bytes()
            };
            tracing::debug!(path = %path.display(), cbor, "writing answer set");
            fs::write(&path, bytes)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", answer_set.to_json_pretty()?),
    }
    Ok(())
}

fn run_schema(section_id: Option<&str>, model: bool) -> CliResult<()> {
    let schema = if model {
        serde_json::to_value(schemars::schema_for!(Section))?
    } else {
        let id = section_id.ok_or("either --section or --model is required")?;
        exam_spec::answers_schema(find_section(id)?)
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Relative paths land under `output_dir` when one is configured.
fn resolve_output_path(path: PathBuf, output_dir: Option<OsString>) -> PathBuf {
    match output_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) if path.is_relative() => PathBuf::from(dir).join(path),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn relative_output_uses_configured_dir() {
        let resolved = resolve_output_path(
            PathBuf::from("e9.json"),
            Some(OsString::from("/tmp/exam-out")),
        );
        assert_eq!(resolved, PathBuf::from("/tmp/exam-out/e9.json"));
    }

    #[test]
    fn absolute_output_ignores_configured_dir() {
        let resolved = resolve_output_path(
            PathBuf::from("/var/answers/e9.json"),
            Some(OsString::from("/tmp/exam-out")),
        );
        assert_eq!(resolved, PathBuf::from("/var/answers/e9.json"));
        let unset = resolve_output_path(PathBuf::from("e9.json"), None);
        assert_eq!(unset, PathBuf::from("e9.json"));
    }

    #[test]
    fn cbor_requires_an_output_file() {
        let parsed = Cli::try_parse_from([
            "exam-forms",
            "submit",
            "--section",
            "e9",
            "--answers",
            "a.json",
            "--cbor",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["exam-forms", "schema"]).is_err());
        assert!(
            Cli::try_parse_from(["exam-forms", "schema", "--section", "e1", "--model"]).is_err()
        );
        assert!(Cli::try_parse_from(["exam-forms", "schema", "--model"]).is_ok());
    }

    #[test]
    fn unknown_section_names_the_id() {
        let err = find_section("e42").unwrap_err();
        assert_eq!(err.to_string(), "section 'e42' is not available");
    }
}
