//! Stack output collaborator trait and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StackOutput;

/// Read-only source of infrastructure stack outputs.
///
/// Consumed only to satisfy source references; never written back.
#[async_trait]
pub trait StackOutputs: Send + Sync {
    /// List all outputs of the stack.
    async fn describe_outputs(&self) -> Result<Vec<StackOutput>>;
}

/// In-memory stack outputs for tests and dry runs.
#[derive(Default)]
pub struct InMemoryStackOutputs {
    outputs: Vec<StackOutput>,
}

impl InMemoryStackOutputs {
    /// Create an empty output list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a fixed output list, wrapped in an Arc.
    pub fn with_outputs(outputs: Vec<StackOutput>) -> Arc<Self> {
        Arc::new(Self { outputs })
    }
}

#[async_trait]
impl StackOutputs for InMemoryStackOutputs {
    async fn describe_outputs(&self) -> Result<Vec<StackOutput>> {
        Ok(self.outputs.clone())
    }
}
