//! hn-graph: segment forest layer for hydronet.
//!
//! Provides:
//! - Forest data structures (SegmentNode, SegmentForest)
//! - Incremental builder that resolves string parent links and validates them
//! - Key index between caller ids and arena positions
//!
//! # Example
//!
//! ```
//! use hn_graph::ForestBuilder;
//!
//! let mut builder = ForestBuilder::new();
//! builder.add_segment("riser", "");
//! builder.add_segment("bathroom", "riser");
//! builder.add_segment("kitchen", "riser");
//! let forest = builder.build().unwrap();
//!
//! assert_eq!(forest.roots().len(), 1);
//! assert_eq!(forest.children(forest.roots()[0]).len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod forest;
pub mod indexing;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::ForestBuilder;
pub use error::{GraphError, GraphResult};
pub use forest::{SegmentForest, SegmentNode};
pub use indexing::KeyIndex;
