//! Update phase: write new and changed parameters.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use ssm_store::{ParameterStore, PutRequest};

use crate::types::{FailedWrite, ParameterDiff, PublishOutcome, ResolvedParameter};

/// Description attached to parameters the author left undescribed.
pub const DEFAULT_DESCRIPTION: &str = "Published by ssm-publish";

/// Write every new and changed parameter, never the unchanged ones.
///
/// Writes run concurrently and settle individually: a failing write is
/// recorded against its path and never cancels sibling writes. The
/// returned outcome covers every attempted write exactly once.
pub async fn publish_parameters(
    store: &Arc<dyn ParameterStore>,
    diff: &ParameterDiff,
) -> PublishOutcome {
    let requests: Vec<(String, PutRequest)> = diff
        .to_write()
        .map(|param| (param.path.clone(), put_request(param)))
        .collect();

    debug!(writes = requests.len(), "Publishing parameters");

    let results = join_all(requests.into_iter().map(|(path, request)| async move {
        let result = store.put_parameter(request).await;
        (path, result)
    }))
    .await;

    let mut outcome = PublishOutcome::default();
    for (path, result) in results {
        match result {
            Ok(put) => outcome.written.push(put),
            Err(error) => {
                warn!(path = %path, error = %error, "Parameter write failed");
                outcome.failed.push(FailedWrite {
                    path,
                    reason: error.to_string(),
                });
            }
        }
    }

    outcome
}

fn put_request(param: &ResolvedParameter) -> PutRequest {
    PutRequest {
        name: param.path.clone(),
        value: param.serialized_value(),
        kind: param.storage_kind(),
        tier: param.tier,
        description: param
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        overwrite: true,
    }
}
