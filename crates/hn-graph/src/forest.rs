//! Core forest data structures.

use hn_core::SegmentId;

use crate::indexing::KeyIndex;

/// A pipe segment as seen by the topology layer.
///
/// Nodes carry no hydraulic data, just the caller's id and the resolved
/// parent link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentNode {
    pub id: SegmentId,
    pub key: String,
    /// `None` for roots.
    pub parent: Option<SegmentId>,
}

/// The forest: a validated, immutable set of segment trees.
///
/// The forest stores:
/// - All nodes in a vector indexed by their `SegmentId`.
/// - Compact child adjacency (offsets + flat list), built once.
/// - The roots and a post-order (children before parents) over every tree.
///
/// Child order follows insertion order, so every traversal is deterministic.
#[derive(Debug, Clone)]
pub struct SegmentForest {
    pub(crate) nodes: Vec<SegmentNode>,

    /// Node i's children are in children[child_offsets[i]..child_offsets[i+1]].
    pub(crate) child_offsets: Vec<usize>,
    pub(crate) children: Vec<SegmentId>,

    pub(crate) roots: Vec<SegmentId>,
    pub(crate) post_order: Vec<SegmentId>,
    pub(crate) index: KeyIndex,
}

impl SegmentForest {
    /// Number of segments.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: SegmentId) -> Option<&SegmentNode> {
        self.nodes.get(id.index())
    }

    /// Parent of a segment, `None` for roots and unknown ids.
    pub fn parent(&self, id: SegmentId) -> Option<SegmentId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Direct children of a segment.
    pub fn children(&self, id: SegmentId) -> &[SegmentId] {
        let idx = id.index();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.child_offsets[idx];
        let end = self.child_offsets[idx + 1];
        &self.children[start..end]
    }

    pub fn is_leaf(&self, id: SegmentId) -> bool {
        self.children(id).is_empty()
    }

    /// Segments without a parent, in insertion order.
    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    /// Every segment, children before their parent.
    pub fn post_order(&self) -> &[SegmentId] {
        &self.post_order
    }

    /// Every segment, parents before their children.
    pub fn pre_order(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.post_order.iter().rev().copied()
    }

    /// A segment followed by all of its descendants (parents first).
    pub fn subtree(&self, id: SegmentId) -> Vec<SegmentId> {
        let mut out = Vec::new();
        if id.index() >= self.nodes.len() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Arena position for a caller id.
    pub fn id_of(&self, key: &str) -> Option<SegmentId> {
        self.index.id(key).ok()
    }

    /// Caller id for an arena position.
    pub fn key_of(&self, id: SegmentId) -> Option<&str> {
        self.index.key(id)
    }
}
