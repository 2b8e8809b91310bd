//! hn-core: stable foundation for hydronet.
//!
//! Contains:
//! - units (uom SI types, constructors and the plumbing unit conversions)
//! - numeric (Real, EPSILON and guarded float helpers)
//! - ids (compact arena IDs for segments)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
