//! hn-solver: sizing engine for domestic water distribution networks.
//!
//! Given a forest of pipe segments carrying sanitary fixtures, the engine
//! computes for every segment its flow, diameter, velocity and pressure drop
//! and, for hot water, the supply temperature field and heat losses. For
//! recirculated hot water it then solves the return loop: return flows,
//! return diameters and return temperatures, coupled through a bounded fixed
//! point and followed by a return-temperature repair.
//!
//! The calculation runs in two explicit phases over the forest:
//! - bottom-up: flow, diameter, hydraulics (upstream independent)
//! - top-down: pressures, recommendations, supply temperatures
//!
//! # Example
//!
//! ```
//! use hn_catalog::{Fixture, FixtureKind};
//! use hn_solver::{NetworkCalculationParameters, NetworkSegment, calculate_network};
//!
//! let mut params = NetworkCalculationParameters {
//!     segments: vec![
//!         NetworkSegment::new("main", "", 10.0),
//!         NetworkSegment::new("bathroom", "main", 6.0)
//!             .with_fixture(Fixture::new(FixtureKind::Shower, 1))
//!             .with_fixture(Fixture::new(FixtureKind::WashBasin, 1)),
//!     ],
//!     ..Default::default()
//! };
//! let outcome = calculate_network(&mut params).unwrap();
//! assert!(params.segments[0].result.nominal_diameter_mm >= params.segments[1].result.nominal_diameter_mm);
//! assert_eq!(outcome.summary.segment_count, 2);
//! ```

pub mod config;
pub mod error;
mod forward;
pub mod loop_return;
pub mod network;
pub mod result;
pub mod segment;
pub mod solve;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use loop_return::{LoopReport, RepairReport};
pub use network::{NetworkCalculationParameters, NetworkSegment, NetworkType};
pub use result::{CalculationDetails, OPTIMAL_RECOMMENDATION, PipeSegmentResult, ThermalDetails};
pub use segment::{SegmentInput, SegmentWarning, calculate};
pub use solve::{
    NetworkOutcome, NetworkSummary, build_forest, calculate_network, calculate_network_with_config,
};
