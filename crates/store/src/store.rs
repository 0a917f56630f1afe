//! Parameter store trait and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{
    GetParametersOutput, ParameterTier, PutOutcome, PutRequest, RemoteParameter,
    GET_PARAMETERS_BATCH_LIMIT,
};

/// Remote key-value parameter store.
///
/// The two operations the reconciliation engine depends on; concrete
/// implementations wrap the vendor SDK client.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Query current state for up to [`GET_PARAMETERS_BATCH_LIMIT`] names.
    ///
    /// Names the store does not recognize are returned in
    /// `invalid_names`, not treated as an error.
    async fn get_parameters(
        &self,
        names: &[String],
        with_decryption: bool,
    ) -> Result<GetParametersOutput>;

    /// Write one parameter.
    async fn put_parameter(&self, request: PutRequest) -> Result<PutOutcome>;
}

/// Stored entry with write metadata.
#[derive(Debug, Clone)]
struct StoredParameter {
    parameter: RemoteParameter,
    version: i64,
    tier: ParameterTier,
}

/// In-memory parameter store for tests and dry runs.
#[derive(Default)]
pub struct InMemoryParameterStore {
    entries: RwLock<HashMap<String, StoredParameter>>,
    failing_puts: RwLock<HashSet<String>>,
}

impl InMemoryParameterStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new in-memory store wrapped in an Arc.
    pub fn new_arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Seed the store with an existing parameter at version 1.
    pub async fn seed(&self, parameter: RemoteParameter) {
        let mut entries = self.entries.write().await;
        entries.insert(
            parameter.name.clone(),
            StoredParameter {
                parameter,
                version: 1,
                tier: ParameterTier::Standard,
            },
        );
    }

    /// Make subsequent writes to `name` fail, for exercising
    /// partial-failure handling.
    pub async fn fail_puts_for(&self, name: impl Into<String>) {
        let mut failing = self.failing_puts.write().await;
        failing.insert(name.into());
    }

    /// Current value for a name, if present.
    pub async fn get(&self, name: &str) -> Option<RemoteParameter> {
        let entries = self.entries.read().await;
        entries.get(name).map(|stored| stored.parameter.clone())
    }

    /// Number of stored parameters.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get_parameters(
        &self,
        names: &[String],
        _with_decryption: bool,
    ) -> Result<GetParametersOutput> {
        if names.len() > GET_PARAMETERS_BATCH_LIMIT {
            return Err(Error::BatchTooLarge {
                len: names.len(),
                max: GET_PARAMETERS_BATCH_LIMIT,
            });
        }

        let entries = self.entries.read().await;
        let mut output = GetParametersOutput::default();
        for name in names {
            match entries.get(name) {
                Some(stored) => output.parameters.push(stored.parameter.clone()),
                None => output.invalid_names.push(name.clone()),
            }
        }
        Ok(output)
    }

    async fn put_parameter(&self, request: PutRequest) -> Result<PutOutcome> {
        {
            let failing = self.failing_puts.read().await;
            if failing.contains(&request.name) {
                return Err(Error::operation_failed(
                    "put_parameter",
                    format!("injected failure for '{}'", request.name),
                ));
            }
        }

        let mut entries = self.entries.write().await;
        if !request.overwrite && entries.contains_key(&request.name) {
            return Err(Error::operation_failed(
                "put_parameter",
                format!("parameter '{}' already exists", request.name),
            ));
        }

        let version = entries.get(&request.name).map_or(1, |s| s.version + 1);
        let tier = request.tier.unwrap_or(ParameterTier::Standard);
        debug!(name = %request.name, version, "Storing parameter");
        entries.insert(
            request.name.clone(),
            StoredParameter {
                parameter: RemoteParameter {
                    name: request.name.clone(),
                    value: request.value,
                    kind: request.kind,
                },
                version,
                tier,
            },
        );

        Ok(PutOutcome {
            name: request.name,
            version,
            tier,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::ParameterType;

    fn put(name: &str, value: &str) -> PutRequest {
        PutRequest {
            name: name.to_string(),
            value: value.to_string(),
            kind: ParameterType::String,
            tier: None,
            description: "test".to_string(),
            overwrite: true,
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryParameterStore::new();
        store.put_parameter(put("/app/token", "abc")).await.unwrap();

        let names = vec!["/app/token".to_string()];
        let output = store.get_parameters(&names, true).await.unwrap();
        assert_eq!(output.parameters.len(), 1);
        assert_eq!(output.parameters[0].value, "abc");
        assert!(output.invalid_names.is_empty());
    }

    #[tokio::test]
    async fn test_missing_names_are_invalid_not_errors() {
        let store = InMemoryParameterStore::new();
        let names = vec!["/missing".to_string()];
        let output = store.get_parameters(&names, true).await.unwrap();
        assert!(output.parameters.is_empty());
        assert_eq!(output.invalid_names, vec!["/missing".to_string()]);
    }

    #[tokio::test]
    async fn test_batch_limit_enforced() {
        let store = InMemoryParameterStore::new();
        let names: Vec<String> = (0..11).map(|i| format!("/p{i}")).collect();
        let err = store.get_parameters(&names, true).await.unwrap_err();
        assert_eq!(err, Error::BatchTooLarge { len: 11, max: 10 });
    }

    #[tokio::test]
    async fn test_overwrite_bumps_version() {
        let store = InMemoryParameterStore::new();
        let first = store.put_parameter(put("/app/token", "a")).await.unwrap();
        let second = store.put_parameter(put("/app/token", "b")).await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn test_injected_put_failure() {
        let store = InMemoryParameterStore::new();
        store.fail_puts_for("/app/token").await;
        let err = store.put_parameter(put("/app/token", "a")).await;
        assert!(err.is_err());
        assert!(store.get("/app/token").await.is_none());
    }
}
