//! Forest-specific error types.

use hn_core::HnError;

pub type GraphResult<T> = Result<T, GraphError>;

/// Forest construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two segments share the same id.
    DuplicateKey { key: String },

    /// A segment names a parent that is not part of the collection.
    MissingParent { segment: String, parent: String },

    /// A segment names itself as parent.
    SelfParent { segment: String },

    /// A segment is part of (or hangs below) a parent cycle.
    Cycle { segment: String },

    /// More segments than the arena can address.
    TooManySegments { count: usize },

    /// Key not found in the index.
    KeyNotFound { key: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateKey { key } => {
                write!(f, "Segment id '{}' is used more than once", key)
            }
            GraphError::MissingParent { segment, parent } => {
                write!(
                    f,
                    "Segment '{}' refers to non-existent parent '{}'",
                    segment, parent
                )
            }
            GraphError::SelfParent { segment } => {
                write!(f, "Segment '{}' is its own parent", segment)
            }
            GraphError::Cycle { segment } => {
                write!(f, "Segment '{}' is not reachable from any root (parent cycle)", segment)
            }
            GraphError::TooManySegments { count } => {
                write!(f, "{} segments exceed the addressable arena size", count)
            }
            GraphError::KeyNotFound { key } => {
                write!(f, "Segment '{}' not found in index", key)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for HnError {
    fn from(err: GraphError) -> Self {
        HnError::Invariant {
            what: err.to_string(),
        }
    }
}
