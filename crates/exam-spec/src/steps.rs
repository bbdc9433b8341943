use crate::context::ContextKey;
use crate::error::StepError;
use crate::projection::FieldInstance;
use crate::spec::step::{StepDefinition, StepMap};

/// Instances shown by `step_name`.
///
/// Path lists keep the listed order. A `"seg.*"` wildcard keeps instances
/// below `section_root.seg` that were also enriched with `seg` for the
/// context slot `seg` belongs to, so fields that only share the prefix are
/// left out.
pub fn get_step_instances<'i, 'm>(
    instances: &'i [FieldInstance<'m>],
    steps: &StepMap,
    step_name: &str,
    section_root: &str,
) -> Result<Vec<&'i FieldInstance<'m>>, StepError> {
    let definition = steps
        .get(step_name)
        .ok_or_else(|| StepError::UnknownStep(step_name.to_string()))?;

    let selected: Vec<&'i FieldInstance<'m>> = match definition {
        StepDefinition::Paths(paths) => paths
            .iter()
            .filter_map(|relative| {
                let path = join(section_root, relative);
                let found = instances.iter().find(|instance| instance.path == path);
                if found.is_none() {
                    tracing::warn!(step = step_name, path = %path, "step path matches no field");
                }
                found
            })
            .collect(),
        StepDefinition::Wildcard(pattern) => {
            let (segment, key) = parse_wildcard(pattern)?;
            let prefix = format!("{}.", join(section_root, segment));
            instances
                .iter()
                .filter(|instance| {
                    instance.path.starts_with(&prefix)
                        && instance.context.get(key) == Some(segment)
                })
                .collect()
        }
    };

    tracing::debug!(
        step = step_name,
        root = section_root,
        count = selected.len(),
        "resolved step"
    );
    Ok(selected)
}

/// Checks every step of `steps` up front: explicit paths must exist and
/// wildcards must parse and select something.
pub fn validate_steps(
    instances: &[FieldInstance<'_>],
    steps: &StepMap,
    section_root: &str,
) -> Result<(), StepError> {
    for (name, definition) in steps {
        match definition {
            StepDefinition::Paths(paths) => {
                for relative in paths {
                    let path = join(section_root, relative);
                    if !instances.iter().any(|instance| instance.path == path) {
                        return Err(StepError::MissingPath {
                            step: name.clone(),
                            path,
                        });
                    }
                }
                if paths.is_empty() {
                    return Err(StepError::EmptyStep { step: name.clone() });
                }
            }
            StepDefinition::Wildcard(_) => {
                if get_step_instances(instances, steps, name, section_root)?.is_empty() {
                    return Err(StepError::EmptyStep { step: name.clone() });
                }
            }
        }
    }
    Ok(())
}

fn parse_wildcard(pattern: &str) -> Result<(&str, ContextKey), StepError> {
    let (segment, rest) = pattern
        .split_once('.')
        .filter(|(segment, rest)| !segment.is_empty() && *rest == "*")
        .ok_or_else(|| StepError::InvalidWildcard(pattern.to_string()))?;
    let key = ContextKey::implied_by(segment)
        .ok_or_else(|| StepError::UnresolvableWildcard(segment.to_string()))?;
    Ok((segment, key))
}

fn join(root: &str, relative: &str) -> String {
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}.{relative}")
    }
}
