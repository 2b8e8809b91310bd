//! hn-components: pipe models for domestic water networks.
//!
//! Provides:
//! - `PipeRun`: Darcy-Weisbach hydraulics with laminar / Swamee-Jain friction
//! - `InsulatedPipe`: two-resistance radial heat loss (insulation + convection)
//! - Catalog diameter selection against a velocity cap or a velocity band
//!
//! All models are deterministic functions of geometry and flow.
//!
//! # Example
//!
//! ```
//! use hn_catalog::PipeMaterial;
//! use hn_components::{PipeRun, select_optimal_diameter};
//! use hn_core::units::{lpm, m, mm};
//!
//! let material = PipeMaterial::Copper;
//! let dn = select_optimal_diameter(12.0, material, 2.0, 0.0);
//! let pipe = PipeRun::new(
//!     m(10.0),
//!     mm(material.internal_diameter(dn)),
//!     mm(material.roughness_mm()),
//!     0.2,
//! );
//! let state = pipe.hydraulics(lpm(12.0), 1.3e-6).unwrap();
//! assert!(state.velocity_mps <= 2.0);
//! ```

pub mod common;
pub mod error;
pub mod pipe;
pub mod sizing;
pub mod thermal;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use pipe::{FlowRegime, HydraulicState, PipeRun, darcy_friction_factor};
pub use sizing::{VelocityBand, select_optimal_diameter, select_return_diameter, velocity_mps};
pub use thermal::{InsulatedPipe, ThermalLoss};
