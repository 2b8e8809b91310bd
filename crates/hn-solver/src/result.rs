//! Per-segment calculation output.
//!
//! Fields fall in two groups. Flow, diameters, velocity, friction and
//! pressure drop depend only on the segment and its descendants and are
//! final after the bottom-up phase. Pressures, supply temperatures, heat
//! loss and the recommendation depend on the upstream path and are valid
//! only after the top-down phase. Return-path fields are written by the
//! loop solver. A zero means "not applicable".

use hn_components::{FlowRegime, ThermalLoss};

/// Text used when no threshold is violated.
pub const OPTIMAL_RECOMMENDATION: &str = "Diameter is optimal";

/// Intermediate values of a radial heat-loss evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThermalDetails {
    pub pipe_outer_radius_m: f64,
    pub insulation_outer_radius_m: f64,
    pub r_insulation: f64,
    pub r_external: f64,
    pub loss_per_meter_w: f64,
    pub mass_flow_kg_s: f64,
    pub temperature_drop_c: f64,
}

impl ThermalDetails {
    pub(crate) fn from_loss(loss: &ThermalLoss, mass_flow_kg_s: f64, drop_c: f64) -> Self {
        Self {
            pipe_outer_radius_m: loss.pipe_outer_radius_m,
            insulation_outer_radius_m: loss.insulation_outer_radius_m,
            r_insulation: loss.r_insulation,
            r_external: loss.r_external,
            loss_per_meter_w: loss.loss_per_meter_w,
            mass_flow_kg_s,
            temperature_drop_c: drop_c,
        }
    }
}

/// Audit trail of one segment's calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationDetails {
    /// Units attached directly to the segment
    pub fixture_count: u32,
    /// Sum of unit flows before the coefficient (L/min)
    pub base_flow_lpm: f64,
    pub simultaneity_coefficient: f64,
    pub flow_m3_s: f64,
    pub internal_diameter_mm: f64,
    pub cross_section_m2: f64,
    pub kinematic_viscosity_m2_s: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub relative_roughness: f64,
    pub friction_factor: f64,
    pub linear_loss_mce: f64,
    pub singular_loss_mce: f64,
    pub elevation_loss_mce: f64,
    pub velocity_cap_mps: f64,
    /// Inlet pressure minus the segment's drop (bar)
    pub available_pressure_bar: f64,
    pub supply_thermal: Option<ThermalDetails>,
    pub return_thermal: Option<ThermalDetails>,
}

/// Engine output for one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeSegmentResult {
    pub flow_rate_lpm: f64,
    pub velocity_mps: f64,
    pub pressure_drop_mce: f64,
    /// Zero until the segment has been calculated.
    pub nominal_diameter_mm: f64,
    pub actual_diameter_mm: f64,

    pub return_flow_rate_lpm: f64,
    pub return_nominal_diameter_mm: f64,
    pub return_actual_diameter_mm: f64,
    pub return_velocity_mps: f64,

    pub inlet_temperature_c: f64,
    /// Supply outlet temperature. Carried by `flow_rate_lpm` in hot-water
    /// networks and by `return_flow_rate_lpm` (the circulation) in loop
    /// networks, so a loop segment without fixtures still cools.
    pub outlet_temperature_c: f64,
    pub return_inlet_temperature_c: f64,
    pub return_outlet_temperature_c: f64,
    /// Supply pipe loss (W) at the inlet temperature, whatever the flow.
    pub heat_loss_w: f64,
    pub return_heat_loss_w: f64,

    pub recommendation: String,
    pub details: CalculationDetails,
}

impl PipeSegmentResult {
    pub fn is_calculated(&self) -> bool {
        self.nominal_diameter_mm > 0.0
    }

    /// Whether the recommendation carries at least one warning.
    pub fn has_warnings(&self) -> bool {
        !self.recommendation.is_empty() && self.recommendation != OPTIMAL_RECOMMENDATION
    }
}
