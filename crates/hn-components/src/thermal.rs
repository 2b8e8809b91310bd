//! Radial heat loss of an insulated pipe.
//!
//! Two resistances in series per metre of pipe:
//! - insulation layer: `ln(r_ins / r_pipe) / (2π·λ)`
//! - external convection: `1 / (h·2π·r_ins)`

use std::f64::consts::PI;

use hn_catalog::water::{SPECIFIC_HEAT_J_KG_K, VOLUMETRIC_HEAT_WH_M3_K, mass_flow_kg_s};
use hn_core::units::Length;

use crate::common::EPSILON_FLOW;

/// Thermal conductivity of elastomeric insulation (W/(m·K)).
pub const INSULATION_CONDUCTIVITY_W_MK: f64 = 0.04;

/// Still-air external convection coefficient (W/(m²·K)).
pub const EXTERNAL_CONVECTION_W_M2K: f64 = 10.0;

/// Wall thickness (mm) assumed for the thermal model.
pub fn thermal_wall_mm(diameter_mm: f64) -> f64 {
    if diameter_mm <= 22.0 { 1.0 } else { 1.5 }
}

/// Result of one heat-loss evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThermalLoss {
    pub pipe_outer_radius_m: f64,
    pub insulation_outer_radius_m: f64,
    /// Insulation resistance per metre (m·K/W).
    pub r_insulation: f64,
    /// External convection resistance per metre (m·K/W).
    pub r_external: f64,
    pub loss_per_meter_w: f64,
    pub heat_loss_w: f64,
}

/// Pipe wrapped in an insulation sleeve, exposed to still air.
#[derive(Debug, Clone)]
pub struct InsulatedPipe {
    pub diameter: Length,
    pub insulation: Length,
    pub length: Length,
}

impl InsulatedPipe {
    pub fn new(diameter: Length, insulation: Length, length: Length) -> Self {
        Self {
            diameter,
            insulation,
            length,
        }
    }

    /// Heat lost (W) by water at `water_c` to air at `ambient_c`.
    ///
    /// No heat gain is modelled: water at or below ambient loses nothing.
    pub fn heat_loss(&self, water_c: f64, ambient_c: f64) -> ThermalLoss {
        let diameter_mm = self.diameter.value * 1000.0;
        let r_pipe = self.diameter.value / 2.0 + thermal_wall_mm(diameter_mm) / 1000.0;
        let r_ins = r_pipe + self.insulation.value.max(0.0);

        let r_insulation = if r_pipe > 0.0 {
            (r_ins / r_pipe).ln() / (2.0 * PI * INSULATION_CONDUCTIVITY_W_MK)
        } else {
            0.0
        };
        let r_external = if r_ins > 0.0 {
            1.0 / (EXTERNAL_CONVECTION_W_M2K * 2.0 * PI * r_ins)
        } else {
            0.0
        };

        let total_r = r_insulation + r_external;
        let per_meter = if total_r > 0.0 {
            ((water_c - ambient_c) / total_r).max(0.0)
        } else {
            0.0
        };

        ThermalLoss {
            pipe_outer_radius_m: r_pipe,
            insulation_outer_radius_m: r_ins,
            r_insulation,
            r_external,
            loss_per_meter_w: per_meter,
            heat_loss_w: per_meter * self.length.value.max(0.0),
        }
    }
}

/// Temperature drop (K) of a stream losing `heat_w` with volume flow `flow_m3_s`.
///
/// `ΔT = Q / (ṁ·cp)`; zero flow means no drop.
pub fn temperature_drop(heat_w: f64, flow_m3_s: f64) -> f64 {
    if flow_m3_s.abs() < EPSILON_FLOW {
        return 0.0;
    }
    heat_w / (mass_flow_kg_s(flow_m3_s.abs()) * SPECIFIC_HEAT_J_KG_K)
}

/// Temperature drop (K) in plumbing units: `ΔT = Q / (1160·Q_m³/h)`.
pub fn temperature_drop_m3h(heat_w: f64, flow_m3_h: f64) -> f64 {
    if flow_m3_h.abs() / 3600.0 < EPSILON_FLOW {
        return 0.0;
    }
    heat_w / (VOLUMETRIC_HEAT_WH_M3_K * flow_m3_h.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{m, mm};

    #[test]
    fn wall_tiers() {
        assert_eq!(thermal_wall_mm(16.0), 1.0);
        assert_eq!(thermal_wall_mm(22.0), 1.0);
        assert_eq!(thermal_wall_mm(28.0), 1.5);
    }

    #[test]
    fn insulated_copper_loss() {
        // 14 mm bore, 13 mm sleeve, 10 m, 60 °C water in 20 °C air
        let pipe = InsulatedPipe::new(mm(14.0), mm(13.0), m(10.0));
        let loss = pipe.heat_loss(60.0, 20.0);

        assert!((loss.pipe_outer_radius_m - 0.008).abs() < 1e-12);
        assert!((loss.insulation_outer_radius_m - 0.021).abs() < 1e-12);
        let expected_ri = (0.021_f64 / 0.008).ln() / (2.0 * PI * 0.04);
        let expected_re = 1.0 / (10.0 * 2.0 * PI * 0.021);
        assert!((loss.r_insulation - expected_ri).abs() < 1e-9);
        assert!((loss.r_external - expected_re).abs() < 1e-9);
        let expected_q = 40.0 / (expected_ri + expected_re);
        assert!((loss.loss_per_meter_w - expected_q).abs() < 1e-9);
        assert!((loss.heat_loss_w - 10.0 * expected_q).abs() < 1e-9);
    }

    #[test]
    fn thicker_insulation_loses_less() {
        let thin = InsulatedPipe::new(mm(14.0), mm(9.0), m(1.0)).heat_loss(60.0, 20.0);
        let thick = InsulatedPipe::new(mm(14.0), mm(19.0), m(1.0)).heat_loss(60.0, 20.0);
        assert!(thick.heat_loss_w < thin.heat_loss_w);
    }

    #[test]
    fn bare_pipe_is_convection_only() {
        let loss = InsulatedPipe::new(mm(14.0), mm(0.0), m(1.0)).heat_loss(60.0, 20.0);
        assert_eq!(loss.r_insulation, 0.0);
        assert!(loss.r_external > 0.0);
    }

    #[test]
    fn no_heat_gain() {
        let loss = InsulatedPipe::new(mm(14.0), mm(13.0), m(5.0)).heat_loss(15.0, 20.0);
        assert_eq!(loss.heat_loss_w, 0.0);
    }

    #[test]
    fn temperature_drop_guards_zero_flow() {
        assert_eq!(temperature_drop(100.0, 0.0), 0.0);
        assert_eq!(temperature_drop_m3h(100.0, 0.0), 0.0);
        // 4186 W into 1 kg/s -> 1 K
        assert!((temperature_drop(4186.0, 1e-3) - 1.0).abs() < 1e-9);
        // 1160 W into 1 m3/h -> 1 K
        assert!((temperature_drop_m3h(1160.0, 1.0) - 1.0).abs() < 1e-12);
    }
}
