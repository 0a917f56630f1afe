//! Source reference resolution against stack outputs.

use std::sync::Arc;

use tracing::debug;

use ssm_store::StackOutputs;

use crate::error::{Error, Result};
use crate::types::{DeclaredParameter, ParameterValue, ResolvedParameter, ValueSource};

/// Fill in values for declarations that reference a stack output.
///
/// Stack outputs are only fetched when at least one declaration
/// carries a source reference. Matching is exact and case-sensitive on
/// the output key. A declaration without its own description adopts
/// the output's.
///
/// # Errors
///
/// Fails when the output listing itself fails or when a referenced
/// output does not exist, naming the parameter and the missing source.
pub async fn resolve_sources(
    declared: Vec<DeclaredParameter>,
    outputs: &Arc<dyn StackOutputs>,
) -> Result<Vec<ResolvedParameter>> {
    let needs_outputs = declared.iter().any(DeclaredParameter::needs_resolution);
    let stack_outputs = if needs_outputs {
        let listed = outputs.describe_outputs().await?;
        debug!(outputs = listed.len(), "Fetched stack outputs");
        listed
    } else {
        Vec::new()
    };

    declared
        .into_iter()
        .map(|param| resolve_parameter(param, &stack_outputs))
        .collect()
}

fn resolve_parameter(
    param: DeclaredParameter,
    outputs: &[ssm_store::StackOutput],
) -> Result<ResolvedParameter> {
    let (value, description) = match param.value {
        ValueSource::Literal(value) => (value, param.description),
        ValueSource::Source(source) => {
            let output = outputs
                .iter()
                .find(|output| output.key == source)
                .ok_or_else(|| Error::unresolved_source(&param.path, &source))?;
            let description = param.description.or_else(|| output.description.clone());
            (ParameterValue::Text(output.value.clone()), description)
        }
    };

    Ok(ResolvedParameter {
        path: param.path,
        value,
        secure: param.secure,
        kind: param.kind,
        tier: param.tier,
        description,
    })
}
