//! hn-catalog: pipe catalogs and physical properties for hydronet.
//!
//! Provides:
//! - Pipe materials with their nominal diameter tables, wall approximation
//!   and absolute roughness
//! - Sanitary fixture types with their unit flow rates
//! - The simultaneity coefficient applied to fixture flow sums
//! - Water properties used by the hydraulic and thermal models
//!
//! Everything here is a pure lookup; there is no state.

pub mod error;
pub mod fixture;
pub mod material;
pub mod simultaneity;
pub mod water;

pub use error::{CatalogError, CatalogResult};
pub use fixture::{Fixture, FixtureKind};
pub use material::{PipeMaterial, available_diameters, internal_diameter, roughness_mm};
pub use simultaneity::{fixture_flow_lpm, simultaneity_coefficient};
