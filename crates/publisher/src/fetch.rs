//! Batched remote state retrieval.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use ssm_store::{ParameterStore, GET_PARAMETERS_BATCH_LIMIT};

use crate::error::Result;
use crate::types::RemoteSnapshot;

/// Fetch the store's current state for every given path.
///
/// Paths are partitioned into chunks no larger than the store's
/// per-call query limit and the chunk queries run concurrently. The
/// join is all-or-nothing: one failing chunk fails the whole fetch.
/// Names the store reports as invalid are logged as warnings and kept
/// in the snapshot; they participate in the diff as non-existing.
///
/// # Errors
///
/// Fails when any chunk query fails.
pub async fn fetch_snapshot(
    store: &Arc<dyn ParameterStore>,
    paths: &[String],
    with_decryption: bool,
) -> Result<RemoteSnapshot> {
    let chunks: Vec<&[String]> = paths.chunks(GET_PARAMETERS_BATCH_LIMIT).collect();
    debug!(
        paths = paths.len(),
        chunks = chunks.len(),
        "Fetching remote parameter state"
    );

    let outputs = try_join_all(
        chunks
            .into_iter()
            .map(|chunk| store.get_parameters(chunk, with_decryption)),
    )
    .await?;

    let mut snapshot = RemoteSnapshot::new();
    for output in outputs {
        snapshot.merge(output);
    }

    for name in snapshot.invalid_names() {
        warn!(name = %name, "Store reported name as invalid; treating as non-existing");
    }

    Ok(snapshot)
}
