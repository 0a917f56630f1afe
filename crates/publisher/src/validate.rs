//! Declaration validation and normalization.
//!
//! Fails fast on the first violation, in declaration order. Rules
//! mirror the store's naming constraints: paths may not start with
//! `aws` or `ssm`, may only contain `[a-zA-Z0-9_.\-/]`, may nest at
//! most 15 levels deep, and leave room for the ARN prefix the store
//! prepends.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{DeclaredParameter, RawParameter, ValueSource};

/// Room left for the ARN prefix the store adds to the full name.
const MAX_NAME_LENGTH: usize = 1011;
const MAX_DESCRIPTION_LENGTH: usize = 1024;
const MAX_DEPTH: usize = 15;

/// Validate and normalize the declaration list.
///
/// Declarations with `enabled: false` are dropped silently before any
/// other check fires. Output preserves input order minus drops.
///
/// # Errors
///
/// Returns the first violation found: an empty list, a declaration
/// without a path or without exactly one of value/source, a path or
/// description breaking the store's constraints, or a duplicated path.
pub fn validate_parameters(raw: Vec<RawParameter>) -> Result<Vec<DeclaredParameter>> {
    if raw.is_empty() {
        return Err(Error::NoParamsDefined);
    }

    let mut seen_paths: HashSet<String> = HashSet::new();
    let mut declared = Vec::with_capacity(raw.len());

    for param in raw {
        if param.enabled == Some(false) {
            debug!(path = param.path.as_deref().unwrap_or("<missing>"), "Skipping disabled param");
            continue;
        }

        declared.push(validate_parameter(param, &mut seen_paths)?);
    }

    Ok(declared)
}

fn validate_parameter(
    param: RawParameter,
    seen_paths: &mut HashSet<String>,
) -> Result<DeclaredParameter> {
    let path = param
        .path
        .ok_or_else(|| Error::missing_required_fields("<missing>"))?;

    let value = match (param.value, param.source) {
        (Some(value), None) => ValueSource::Literal(value),
        (None, Some(source)) => ValueSource::Source(source),
        (Some(_), Some(_)) => return Err(Error::AmbiguousValueSource { path }),
        (None, None) => return Err(Error::missing_required_fields(path)),
    };

    let secure = match param.secure {
        None => true,
        Some(toggle) => match toggle.as_bool() {
            Some(value) => value,
            None => {
                warn!(path = %path, "Param should pass secure as a boolean value");
                toggle.truthy()
            }
        },
    };

    if !name_is_valid(&path) {
        return Err(Error::invalid_name(path));
    }

    if let Some(description) = &param.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(Error::DescriptionTooLong { path });
        }
    }

    if !seen_paths.insert(path.clone()) {
        return Err(Error::DuplicatePath { path });
    }

    Ok(DeclaredParameter {
        path,
        value,
        secure,
        kind: param.kind,
        tier: param.tier,
        description: param.description,
    })
}

fn name_is_valid(path: &str) -> bool {
    let lowered = path.to_ascii_lowercase();
    if lowered.starts_with("aws") || lowered.starts_with("ssm") {
        return false;
    }
    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'))
    {
        return false;
    }
    if path.matches('/').count() > MAX_DEPTH {
        return false;
    }
    path.len() <= MAX_NAME_LENGTH
}
