//! Three-way diff of declarations against remote state.

use tracing::debug;

use crate::types::{ParameterDiff, RemoteSnapshot, ResolvedParameter};

/// Partition declarations into non-existing, changed, and unchanged.
///
/// Pure function: every declaration lands in exactly one bucket and
/// each bucket preserves declaration order. Values compare under the
/// parameter's storage type; a remote value that fails to deserialize
/// counts as changed.
pub fn diff_parameters(
    parameters: Vec<ResolvedParameter>,
    snapshot: &RemoteSnapshot,
) -> ParameterDiff {
    let mut diff = ParameterDiff::default();

    for param in parameters {
        match snapshot.get(&param.path) {
            None => diff.non_existing.push(param),
            Some(remote) => {
                if param.value.matches_stored(&remote.value, param.storage_kind()) {
                    diff.unchanged.push(param);
                } else {
                    diff.changed.push(param);
                }
            }
        }
    }

    debug!(
        non_existing = diff.non_existing.len(),
        changed = diff.changed.len(),
        unchanged = diff.unchanged.len(),
        "Computed parameter diff"
    );

    diff
}
