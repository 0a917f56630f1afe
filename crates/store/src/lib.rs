//! Collaborator surface for the SSM publishing engine.
//!
//! This crate defines the two remote operations the reconciliation
//! engine depends on, as explicit traits rather than a dynamically
//! typed SDK handle:
//!
//! - [`ParameterStore`] - batched state queries and typed writes
//! - [`StackOutputs`] - read-only infrastructure stack outputs,
//!   consumed to resolve source references
//!
//! In-memory implementations of both are provided for tests and dry
//! runs.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod outputs;
pub mod store;
pub mod types;

// Re-export main types
pub use error::{Error, Result};
pub use outputs::{InMemoryStackOutputs, StackOutputs};
pub use store::{InMemoryParameterStore, ParameterStore};
pub use types::{
    GetParametersOutput, ParameterTier, ParameterType, PutOutcome, PutRequest, RemoteParameter,
    StackOutput, GET_PARAMETERS_BATCH_LIMIT,
};
