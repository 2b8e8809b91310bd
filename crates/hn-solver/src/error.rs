//! Error types for network calculations.

use hn_components::ComponentError;
use hn_core::error::HnError;
use hn_graph::GraphError;
use thiserror::Error;

/// Errors that can occur before or during a network calculation.
///
/// Numerical trouble inside the engine never surfaces here: zero flows,
/// degenerate diameters and non-convergence all fall back to defined values.
/// These variants cover malformed input only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidInput { what } => HnError::Invariant { what },
            SolverError::Graph(err) => err.into(),
            SolverError::Component(err) => err.into(),
        }
    }
}
