//! Engineering thresholds of the sizing engine.

use hn_components::VelocityBand;

use crate::error::{SolverError, SolverResult};
use crate::network::NetworkType;

/// Solver configuration.
///
/// The defaults are the usual domestic plumbing rules; every field can be
/// overridden from a network file.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Velocity cap for cold and plain hot water (m/s)
    pub max_velocity_mps: f64,
    /// Velocity cap when the hot water is recirculated (m/s)
    pub max_velocity_loop_mps: f64,
    /// Below this velocity a segment is flagged for stagnation (m/s)
    pub stagnation_velocity_mps: f64,
    /// Fittings and bends as a share of the linear loss
    pub singular_loss_ratio: f64,
    /// Temperature drop allowed across the whole loop (°C)
    pub loop_temperature_drop_c: f64,
    /// Target velocity range of return pipes (m/s)
    pub return_velocity_band: VelocityBand,
    /// Smallest return pipe (nominal mm)
    pub min_return_diameter_mm: f64,
    /// Fixed-point iteration cap
    pub max_loop_iterations: usize,
    /// Largest relative return-flow change accepted as converged
    pub loop_tolerance: f64,
    /// Return-flow multiplier applied per repair step
    pub repair_factor: f64,
    /// Repair step cap per root
    pub max_repair_attempts: usize,
    /// Temperature deficit accepted by the repair loop (°C)
    pub repair_tolerance_c: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_velocity_mps: 2.0,
            max_velocity_loop_mps: 1.5,
            stagnation_velocity_mps: 0.3,
            singular_loss_ratio: 0.2,
            loop_temperature_drop_c: 5.0,
            return_velocity_band: VelocityBand::default(),
            min_return_diameter_mm: 10.0,
            max_loop_iterations: 10,
            loop_tolerance: 0.01,
            repair_factor: 1.2,
            max_repair_attempts: 10,
            repair_tolerance_c: 0.1,
        }
    }
}

impl SolverConfig {
    /// Supply velocity cap for a network type.
    pub fn velocity_cap(&self, network_type: NetworkType) -> f64 {
        match network_type {
            NetworkType::HotWaterLoop => self.max_velocity_loop_mps,
            NetworkType::ColdWater | NetworkType::HotWater => self.max_velocity_mps,
        }
    }

    /// Reject thresholds the engine cannot work with.
    pub fn validate(&self) -> SolverResult<()> {
        let positive = [
            ("max_velocity_mps", self.max_velocity_mps),
            ("max_velocity_loop_mps", self.max_velocity_loop_mps),
            ("loop_temperature_drop_c", self.loop_temperature_drop_c),
            ("return_velocity_band.max", self.return_velocity_band.max),
            ("loop_tolerance", self.loop_tolerance),
            ("repair_tolerance_c", self.repair_tolerance_c),
        ];
        for (what, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolverError::InvalidInput {
                    what: format!("{what} must be positive, got {value}"),
                });
            }
        }

        let non_negative = [
            ("stagnation_velocity_mps", self.stagnation_velocity_mps),
            ("singular_loss_ratio", self.singular_loss_ratio),
            ("return_velocity_band.min", self.return_velocity_band.min),
            ("min_return_diameter_mm", self.min_return_diameter_mm),
        ];
        for (what, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SolverError::InvalidInput {
                    what: format!("{what} must be non-negative, got {value}"),
                });
            }
        }

        if self.return_velocity_band.min > self.return_velocity_band.max {
            return Err(SolverError::InvalidInput {
                what: "return velocity band is inverted".to_string(),
            });
        }
        if !self.repair_factor.is_finite() || self.repair_factor <= 1.0 {
            return Err(SolverError::InvalidInput {
                what: format!("repair_factor must exceed 1, got {}", self.repair_factor),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_networks_use_the_lower_cap() {
        let config = SolverConfig::default();
        assert_eq!(config.velocity_cap(NetworkType::ColdWater), 2.0);
        assert_eq!(config.velocity_cap(NetworkType::HotWater), 2.0);
        assert_eq!(config.velocity_cap(NetworkType::HotWaterLoop), 1.5);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let config = SolverConfig {
            return_velocity_band: VelocityBand { min: 0.6, max: 0.5 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shrinking_repair_is_rejected() {
        let config = SolverConfig {
            repair_factor: 0.9,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("repair_factor"));
    }
}
