//! Declarative parameter reconciliation against a remote store.
//!
//! The pipeline flows strictly left to right:
//!
//! - **Validate**: normalize and reject malformed declarations
//! - **Resolve**: fill in values sourced from stack outputs
//! - **Fetch**: read current remote state in batches of at most 10
//! - **Diff**: partition into non-existing / changed / unchanged
//! - **Publish**: write the new and changed partitions, settling each
//!   write individually
//! - **Report**: tabular summary of what happened
//!
//! # Example
//!
//! ```
//! use ssm_publish::{PublisherBuilder, RawParameter};
//! use ssm_store::InMemoryParameterStore;
//!
//! #[tokio::main]
//! async fn main() -> ssm_publish::Result<()> {
//!     let publisher = PublisherBuilder::new()
//!         .with_store(InMemoryParameterStore::new_arc())
//!         .build()?;
//!
//!     let summary = publisher
//!         .run(vec![RawParameter::literal("/app/token", "s3cret")])
//!         .await?;
//!     assert!(summary.all_succeeded());
//!     assert_eq!(summary.created, vec!["/app/token".to_string()]);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod diff;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod resolve;
pub mod types;
pub mod validate;

// Re-export main types
pub use diff::diff_parameters;
pub use error::{Error, Result};
pub use fetch::fetch_snapshot;
pub use pipeline::{
    evaluate_enabled, region_supports_ssm, Publisher, PublisherBuilder, PublisherConfig,
};
pub use publish::{publish_parameters, DEFAULT_DESCRIPTION};
pub use report::{log_summary, render_summary};
pub use resolve::resolve_sources;
pub use types::{
    DeclaredParameter, FailedWrite, ParameterDiff, ParameterValue, PublishOutcome, RawParameter,
    RemoteSnapshot, ResolvedParameter, RunSummary, Toggle, ValueSource,
};
pub use validate::validate_parameters;
