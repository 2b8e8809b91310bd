//! Incremental forest builder.

use hn_core::SegmentId;

use crate::error::GraphResult;
use crate::forest::{SegmentForest, SegmentNode};
use crate::indexing::KeyIndex;
use crate::validate;

/// Builder for constructing a segment forest incrementally.
///
/// Use `add_segment` with the caller's id and parent id (empty for a root),
/// then call `build()` to resolve the links, validate them and freeze the
/// result into an immutable `SegmentForest`.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    /// (key, parent key) in insertion order.
    pending: Vec<(String, String)>,
}

impl ForestBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with room for `capacity` segments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Add a segment. An empty `parent` makes it a root.
    pub fn add_segment(&mut self, key: impl Into<String>, parent: impl Into<String>) {
        self.pending.push((key.into(), parent.into()));
    }

    /// Number of segments added so far.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Build and validate the forest.
    ///
    /// Rejects duplicate ids, dangling or self parent links and parent cycles.
    pub fn build(self) -> GraphResult<SegmentForest> {
        let mut index = KeyIndex::new();
        let mut ids = Vec::with_capacity(self.pending.len());
        for (key, _) in &self.pending {
            ids.push(index.insert(key.clone())?);
        }

        let parents = validate::resolve_parents(&index, &self.pending)?;

        let (child_offsets, children) = Self::build_adjacency(&ids, &parents);
        let roots: Vec<SegmentId> = ids
            .iter()
            .zip(&parents)
            .filter(|(_, parent)| parent.is_none())
            .map(|(id, _)| *id)
            .collect();
        let post_order = Self::post_order(ids.len(), &roots, &child_offsets, &children);

        validate::validate_acyclic(&index, &post_order)?;

        let nodes = self
            .pending
            .into_iter()
            .zip(ids.iter().zip(&parents))
            .map(|((key, _), (id, parent))| SegmentNode {
                id: *id,
                key,
                parent: *parent,
            })
            .collect();

        Ok(SegmentForest {
            nodes,
            child_offsets,
            children,
            roots,
            post_order,
            index,
        })
    }

    /// Build compact adjacency lists: for each segment, collect its children.
    fn build_adjacency(
        ids: &[SegmentId],
        parents: &[Option<SegmentId>],
    ) -> (Vec<usize>, Vec<SegmentId>) {
        let mut counts = vec![0_usize; ids.len()];
        for parent in parents.iter().flatten() {
            counts[parent.index()] += 1;
        }

        let mut offsets = Vec::with_capacity(ids.len() + 1);
        offsets.push(0);
        for count in &counts {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + count);
        }

        // Fill in insertion order for determinism
        let mut cursor = offsets[..ids.len()].to_vec();
        let mut slots: Vec<Option<SegmentId>> = vec![None; offsets[ids.len()]];
        for (id, parent) in ids.iter().zip(parents) {
            if let Some(parent) = parent {
                let slot = &mut cursor[parent.index()];
                slots[*slot] = Some(*id);
                *slot += 1;
            }
        }

        (offsets, slots.into_iter().flatten().collect())
    }

    /// Iterative depth-first walk from every root, emitting children before parents.
    fn post_order(
        len: usize,
        roots: &[SegmentId],
        offsets: &[usize],
        children: &[SegmentId],
    ) -> Vec<SegmentId> {
        let mut order = Vec::with_capacity(len);
        let mut visited = vec![false; len];

        for &root in roots {
            visited[root.index()] = true;
            let mut stack: Vec<(SegmentId, usize)> = vec![(root, 0)];
            while let Some(top) = stack.last_mut() {
                let (node, cursor) = *top;
                let kids = &children[offsets[node.index()]..offsets[node.index() + 1]];
                if cursor < kids.len() {
                    top.1 += 1;
                    let child = kids[cursor];
                    if !visited[child.index()] {
                        visited[child.index()] = true;
                        stack.push((child, 0));
                    }
                } else {
                    order.push(node);
                    stack.pop();
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn builder_basic() {
        let mut builder = ForestBuilder::new();
        builder.add_segment("main", "");
        builder.add_segment("branch", "main");

        assert_eq!(builder.len(), 2);
        let forest = builder.build().unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn builder_empty() {
        let forest = ForestBuilder::new().build().unwrap();
        assert!(forest.is_empty());
        assert!(forest.roots().is_empty());
        assert!(forest.post_order().is_empty());
    }

    #[test]
    fn builder_children_in_insertion_order() {
        let mut builder = ForestBuilder::new();
        builder.add_segment("c2", "r");
        builder.add_segment("r", "");
        builder.add_segment("c1", "r");
        let forest = builder.build().unwrap();

        let r = forest.id_of("r").unwrap();
        let kids: Vec<&str> = forest
            .children(r)
            .iter()
            .filter_map(|id| forest.key_of(*id))
            .collect();
        assert_eq!(kids, vec!["c2", "c1"]);
    }

    #[test]
    fn builder_post_order_children_first() {
        let mut builder = ForestBuilder::new();
        builder.add_segment("r", "");
        builder.add_segment("a", "r");
        builder.add_segment("a1", "a");
        builder.add_segment("b", "r");
        let forest = builder.build().unwrap();

        let position = |key: &str| {
            let id = forest.id_of(key).unwrap();
            forest.post_order().iter().position(|x| *x == id).unwrap()
        };
        assert!(position("a1") < position("a"));
        assert!(position("a") < position("r"));
        assert!(position("b") < position("r"));
    }

    #[test]
    fn builder_detects_two_node_cycle() {
        let mut builder = ForestBuilder::new();
        builder.add_segment("r", "");
        builder.add_segment("x", "y");
        builder.add_segment("y", "x");
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphError::Cycle { .. }));
    }

    #[test]
    fn builder_detects_duplicate() {
        let mut builder = ForestBuilder::new();
        builder.add_segment("r", "");
        builder.add_segment("r", "");
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::DuplicateKey { key: "r".into() }
        );
    }
}
