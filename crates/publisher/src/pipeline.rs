//! The publishing pipeline.
//!
//! Ties the stages together: validate, resolve sources, fetch remote
//! state, diff, publish, report. Each stage takes the previous stage's
//! output as a value; nothing mutates shared state between stages.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use ssm_store::{InMemoryStackOutputs, ParameterStore, StackOutputs};

use crate::diff::diff_parameters;
use crate::error::{Error, Result};
use crate::fetch::fetch_snapshot;
use crate::publish::publish_parameters;
use crate::report::log_summary;
use crate::resolve::resolve_sources;
use crate::types::{RawParameter, ResolvedParameter, RunSummary, Toggle};
use crate::validate::validate_parameters;

/// Region prefixes where the store is disabled by default.
const UNSUPPORTED_REGION_PREFIXES: [&str; 2] = [
    "ap-east-1",  // Hong Kong
    "me-south-1", // Bahrain
];

/// Whether the store is available by default in the given region.
pub fn region_supports_ssm(region: &str) -> bool {
    !UNSUPPORTED_REGION_PREFIXES
        .iter()
        .any(|prefix| region.starts_with(prefix))
}

/// Evaluate the host-supplied enablement flag.
///
/// Absent means enabled. Booleans pass through; the strings "true" and
/// "false" are accepted for configurations that stringify everything.
///
/// # Errors
///
/// Any other value is ambiguous and fatal.
pub fn evaluate_enabled(enabled: Option<&Toggle>) -> Result<bool> {
    match enabled {
        None => Ok(true),
        Some(Toggle::Bool(value)) => Ok(*value),
        Some(Toggle::Other(serde_json::Value::String(s))) if s == "true" => Ok(true),
        Some(Toggle::Other(serde_json::Value::String(s))) if s == "false" => Ok(false),
        Some(Toggle::Other(value)) => {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Err(Error::AmbiguousEnabled { value })
        }
    }
}

/// Configuration for the publisher.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Decrypt secure values during the state fetch so comparison sees
    /// plaintext on both sides.
    pub with_decryption: bool,
    /// Region the store client is bound to, when known. Only used for
    /// the unsupported-region warning.
    pub region: Option<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            with_decryption: true,
            region: None,
        }
    }
}

/// Reconciles declared parameters against the remote store.
pub struct Publisher {
    store: Arc<dyn ParameterStore>,
    outputs: Arc<dyn StackOutputs>,
    config: PublisherConfig,
}

impl Publisher {
    /// Create a new publisher.
    pub fn new(
        store: Arc<dyn ParameterStore>,
        outputs: Arc<dyn StackOutputs>,
        config: PublisherConfig,
    ) -> Self {
        Self {
            store,
            outputs,
            config,
        }
    }

    /// Run the full pipeline over the raw declarations.
    ///
    /// # Errors
    ///
    /// Fails before any remote mutation on validation errors,
    /// unresolved source references, or a failing state fetch. Write
    /// failures do not fail the run; they are gathered per path in the
    /// summary and `RunSummary::all_succeeded` reports them.
    pub async fn run(&self, raw: Vec<RawParameter>) -> Result<RunSummary> {
        if let Some(region) = &self.config.region {
            if !region_supports_ssm(region) {
                warn!(region = %region, "Configured region does not support SSM by default");
            }
        }

        let declared = validate_parameters(raw)?;
        info!(params = declared.len(), "Validated parameter declarations");

        let resolved = resolve_sources(declared, &self.outputs).await?;

        let paths: Vec<String> = resolved.iter().map(|p| p.path.clone()).collect();
        let snapshot = fetch_snapshot(&self.store, &paths, self.config.with_decryption).await?;

        let diff = diff_parameters(resolved, &snapshot);
        if diff.is_converged() {
            info!(unchanged = diff.unchanged.len(), "Remote state already converged");
        }

        let outcome = publish_parameters(&self.store, &diff).await;

        let written_paths: HashSet<&str> =
            outcome.written.iter().map(|put| put.name.as_str()).collect();
        let created = bucket_paths(&diff.non_existing, &written_paths);
        let updated = bucket_paths(&diff.changed, &written_paths);
        drop(written_paths);

        let summary = RunSummary {
            created,
            updated,
            unchanged: diff.unchanged.iter().map(|p| p.path.clone()).collect(),
            failed: outcome.failed,
            written: outcome.written,
        };

        log_summary(&summary);
        Ok(summary)
    }

    /// Get the configuration.
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }
}

fn bucket_paths(bucket: &[ResolvedParameter], written: &HashSet<&str>) -> Vec<String> {
    bucket
        .iter()
        .filter(|p| written.contains(p.path.as_str()))
        .map(|p| p.path.clone())
        .collect()
}

/// Builder for [`Publisher`].
pub struct PublisherBuilder {
    store: Option<Arc<dyn ParameterStore>>,
    outputs: Option<Arc<dyn StackOutputs>>,
    config: PublisherConfig,
}

impl PublisherBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            store: None,
            outputs: None,
            config: PublisherConfig::default(),
        }
    }

    /// Set the parameter store.
    pub fn with_store(mut self, store: Arc<dyn ParameterStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the stack outputs collaborator.
    pub fn with_outputs(mut self, outputs: Arc<dyn StackOutputs>) -> Self {
        self.outputs = Some(outputs);
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: PublisherConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable/disable decryption during the state fetch.
    pub fn with_decryption(mut self, enabled: bool) -> Self {
        self.config.with_decryption = enabled;
        self
    }

    /// Set the region for the unsupported-region warning.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    /// Build the publisher.
    ///
    /// # Errors
    ///
    /// Fails when no parameter store was provided. Stack outputs
    /// default to an empty listing; runs that declare source
    /// references against it fail at resolution.
    pub fn build(self) -> Result<Publisher> {
        let store = self
            .store
            .ok_or_else(|| Error::invalid_config("Parameter store is required"))?;

        let outputs = self
            .outputs
            .unwrap_or_else(|| Arc::new(InMemoryStackOutputs::new()));

        Ok(Publisher::new(store, outputs, self.config))
    }
}

impl Default for PublisherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
