use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::args::CallArgs;
use crate::descriptor::ParamSpec;
use crate::error::ApiClientError;
use crate::param::{ParamLocation, style_param};

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^{}/]+)}").expect("a valid regex"));

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

/// Substitutes the styled path arguments into a path template.
///
/// Every placeholder of the template must be resolved; the same placeholder
/// may appear several times.
pub(crate) fn resolve_path(
    template: &str,
    specs: &[ParamSpec],
    args: &CallArgs,
) -> Result<String, ApiClientError> {
    let mut names: BTreeSet<&str> = RE
        .captures_iter(template)
        .filter_map(|caps| caps.name("name"))
        .map(|found| found.as_str())
        .collect();

    let mut path = template.to_string();
    for spec in specs {
        let Some(value) = args.get(ParamLocation::Path, spec.name) else {
            continue;
        };
        if !names.remove(spec.name) {
            warn!(name = spec.name, template, "argument name not found");
            continue;
        }

        let styled = style_param(
            spec.style,
            spec.explode,
            ParamLocation::Path,
            spec.name,
            value,
        )?;
        if matches!(styled.as_str(), "." | "..") && is_whole_segment(template, spec.name) {
            return Err(ApiClientError::UnsupportedParameterValue {
                message: format!("path parameter '{}' would become a dot segment", spec.name),
                value: value.clone(),
            });
        }
        path = replace_path_param(&path, spec.name, &styled);
    }

    if names.is_empty() {
        Ok(path)
    } else {
        Err(ApiClientError::PathUnresolved {
            path: template.to_string(),
            missings: names.into_iter().map(str::to_string).collect(),
        })
    }
}

fn is_whole_segment(template: &str, param_name: &str) -> bool {
    let pattern = ["{", param_name, "}"].concat();
    template.split('/').any(|segment| segment == pattern)
}

/// Turns an absolute path into a reference relative to the server URL.
///
/// A leading `/` would replace the whole server path when joined, dropping
/// any prefix such as `/compute/`.
pub(crate) fn relative_reference(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Owned(format!(".{path}"))
    } else {
        Cow::Borrowed(path)
    }
}
