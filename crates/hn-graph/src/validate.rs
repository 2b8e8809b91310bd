//! Forest validation logic.

use hn_core::SegmentId;

use crate::error::{GraphError, GraphResult};
use crate::indexing::KeyIndex;

/// Resolve every parent key to an arena position.
///
/// Empty parent keys mark roots.
pub(crate) fn resolve_parents(
    index: &KeyIndex,
    pending: &[(String, String)],
) -> GraphResult<Vec<Option<SegmentId>>> {
    pending
        .iter()
        .map(|(key, parent)| {
            if parent.is_empty() {
                return Ok(None);
            }
            if parent == key {
                return Err(GraphError::SelfParent {
                    segment: key.clone(),
                });
            }
            index
                .id(parent)
                .map(Some)
                .map_err(|_| GraphError::MissingParent {
                    segment: key.clone(),
                    parent: parent.clone(),
                })
        })
        .collect()
}

/// Every segment must be reachable from a root.
///
/// With a single parent per segment, anything the root walk missed sits on
/// or below a parent cycle.
pub(crate) fn validate_acyclic(
    index: &KeyIndex,
    post_order: &[SegmentId],
) -> GraphResult<()> {
    if post_order.len() == index.len() {
        return Ok(());
    }

    let mut visited = vec![false; index.len()];
    for id in post_order {
        visited[id.index()] = true;
    }
    let first_missing = visited.iter().position(|v| !v).unwrap_or(0);
    Err(GraphError::Cycle {
        segment: index.keys()[first_missing].clone(),
    })
}
