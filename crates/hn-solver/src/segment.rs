//! Single-segment sizing.
//!
//! `calculate` sizes one pipe run in isolation. The network passes call the
//! pieces separately: [`size_hydraulics`] bottom-up, then
//! [`apply_pressures`] and [`apply_supply_thermal`] top-down.

use std::fmt;

use hn_catalog::simultaneity::{base_flow_lpm, total_quantity};
use hn_catalog::water::{VOLUMETRIC_HEAT_WH_L_K, kinematic_viscosity, mass_flow_kg_s};
use hn_catalog::{Fixture, PipeMaterial, simultaneity_coefficient};
use hn_components::thermal::{temperature_drop, temperature_drop_m3h};
use hn_components::{InsulatedPipe, PipeRun, select_optimal_diameter, select_return_diameter};
use hn_core::units::{lpm, m, mce_to_bar, mm};

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::network::NetworkType;
use crate::result::{OPTIMAL_RECOMMENDATION, PipeSegmentResult, ThermalDetails};

/// Everything needed to size one segment.
#[derive(Debug, Clone)]
pub struct SegmentInput<'a> {
    pub length_m: f64,
    pub elevation_m: f64,
    pub fixtures: &'a [Fixture],
    /// Forced flow (L/min); used instead of the fixtures when > 0.
    pub override_flow_lpm: f64,
    pub network_type: NetworkType,
    pub material: PipeMaterial,
    pub required_pressure_bar: f64,
    pub inlet_pressure_bar: f64,
    /// Smallest nominal diameter allowed (mm)
    pub min_diameter_mm: f64,
    pub inlet_temperature_c: f64,
    pub ambient_temperature_c: f64,
    pub insulation_thickness_mm: f64,
    /// Temperature at which viscosity is evaluated (°C)
    pub nominal_temperature_c: f64,
    pub config: &'a SolverConfig,
}

/// Threshold violation reported in a recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentWarning {
    Noise { velocity_mps: f64, cap_mps: f64 },
    Stagnation { velocity_mps: f64, min_mps: f64 },
    InsufficientPressure { available_bar: f64, required_bar: f64 },
}

impl fmt::Display for SegmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentWarning::Noise {
                velocity_mps,
                cap_mps,
            } => write!(
                f,
                "Noise risk: velocity {:.2} m/s exceeds {:.1} m/s",
                velocity_mps, cap_mps
            ),
            SegmentWarning::Stagnation {
                velocity_mps,
                min_mps,
            } => write!(
                f,
                "Stagnation risk: velocity {:.2} m/s below {:.1} m/s",
                velocity_mps, min_mps
            ),
            SegmentWarning::InsufficientPressure {
                available_bar,
                required_bar,
            } => write!(
                f,
                "Insufficient pressure: {:.2} bar available, {:.2} bar required",
                available_bar, required_bar
            ),
        }
    }
}

/// Threshold checks on a sized segment.
pub fn check_thresholds(
    velocity_mps: f64,
    available_bar: f64,
    required_bar: f64,
    cap_mps: f64,
    config: &SolverConfig,
) -> Vec<SegmentWarning> {
    let mut warnings = Vec::new();
    if velocity_mps > cap_mps {
        warnings.push(SegmentWarning::Noise {
            velocity_mps,
            cap_mps,
        });
    }
    if velocity_mps < config.stagnation_velocity_mps {
        warnings.push(SegmentWarning::Stagnation {
            velocity_mps,
            min_mps: config.stagnation_velocity_mps,
        });
    }
    if available_bar < required_bar {
        warnings.push(SegmentWarning::InsufficientPressure {
            available_bar,
            required_bar,
        });
    }
    warnings
}

/// Join warnings into the recommendation text.
pub fn recommendation(warnings: &[SegmentWarning]) -> String {
    if warnings.is_empty() {
        return OPTIMAL_RECOMMENDATION.to_string();
    }
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Size a single segment: flow, diameter, hydraulics, pressures and, for hot
/// water, the supply temperature drop.
pub fn calculate(input: &SegmentInput<'_>) -> SolverResult<PipeSegmentResult> {
    let mut result = size_hydraulics(input)?;
    apply_pressures(
        &mut result,
        input.inlet_pressure_bar,
        input.required_pressure_bar,
        input.config,
    );
    if input.network_type.is_hot() {
        let flow = result.flow_rate_lpm;
        apply_supply_thermal(
            &mut result,
            input.length_m,
            input.inlet_temperature_c,
            input.ambient_temperature_c,
            input.insulation_thickness_mm,
            flow,
        );
    }
    Ok(result)
}

/// Upstream-independent part: flow, diameter, velocity, friction and drop.
pub fn size_hydraulics(input: &SegmentInput<'_>) -> SolverResult<PipeSegmentResult> {
    let config = input.config;
    let mut result = PipeSegmentResult::default();
    let details = &mut result.details;

    let count = total_quantity(input.fixtures);
    details.fixture_count = count;
    details.base_flow_lpm = base_flow_lpm(input.fixtures);
    details.simultaneity_coefficient = simultaneity_coefficient(count);

    let flow_lpm = if input.override_flow_lpm > 0.0 {
        input.override_flow_lpm
    } else {
        details.base_flow_lpm * details.simultaneity_coefficient
    };

    let cap = config.velocity_cap(input.network_type);
    let nominal = select_optimal_diameter(flow_lpm, input.material, cap, input.min_diameter_mm);
    let internal = input.material.internal_diameter(nominal);
    let nu = kinematic_viscosity(input.nominal_temperature_c);

    let pipe = PipeRun::new(
        m(input.length_m),
        mm(internal),
        mm(input.material.roughness_mm()),
        config.singular_loss_ratio,
    );
    let state = pipe.hydraulics(lpm(flow_lpm), nu)?;

    details.flow_m3_s = state.flow_m3_s;
    details.internal_diameter_mm = internal;
    details.cross_section_m2 = state.cross_section_m2;
    details.kinematic_viscosity_m2_s = nu;
    details.reynolds = state.reynolds;
    details.regime = state.regime;
    details.relative_roughness = state.relative_roughness;
    details.friction_factor = state.friction_factor;
    details.linear_loss_mce = state.linear_loss_mce;
    details.singular_loss_mce = state.singular_loss_mce;
    details.elevation_loss_mce = input.elevation_m;
    details.velocity_cap_mps = cap;

    result.flow_rate_lpm = flow_lpm;
    result.nominal_diameter_mm = nominal;
    result.actual_diameter_mm = internal;
    result.velocity_mps = state.velocity_mps;
    result.pressure_drop_mce = state.friction_loss_mce() + input.elevation_m;
    Ok(result)
}

/// Outlet/available pressure and recommendation for a known inlet pressure.
///
/// Returns the outlet pressure (bar).
pub fn apply_pressures(
    result: &mut PipeSegmentResult,
    inlet_pressure_bar: f64,
    required_pressure_bar: f64,
    config: &SolverConfig,
) -> f64 {
    let outlet = inlet_pressure_bar - mce_to_bar(result.pressure_drop_mce);
    result.details.available_pressure_bar = outlet;

    let warnings = check_thresholds(
        result.velocity_mps,
        outlet,
        required_pressure_bar,
        result.details.velocity_cap_mps,
        config,
    );
    result.recommendation = recommendation(&warnings);
    outlet
}

/// Supply heat loss and outlet temperature for a given inlet temperature.
///
/// `flow_lpm` is the flow carrying the heat: the draw-off flow in a plain hot
/// water network, the circulation flow once the loop is running. The outlet
/// never falls below ambient.
pub fn apply_supply_thermal(
    result: &mut PipeSegmentResult,
    length_m: f64,
    inlet_c: f64,
    ambient_c: f64,
    insulation_mm: f64,
    flow_lpm: f64,
) {
    let pipe = InsulatedPipe::new(mm(result.actual_diameter_mm), mm(insulation_mm), m(length_m));
    let loss = pipe.heat_loss(inlet_c, ambient_c);

    let flow_m3_s = lpm(flow_lpm).value.abs();
    let drop = temperature_drop(loss.heat_loss_w, flow_m3_s);
    let outlet = (inlet_c - drop).max(ambient_c.min(inlet_c));

    result.inlet_temperature_c = inlet_c;
    result.outlet_temperature_c = outlet;
    result.heat_loss_w = loss.heat_loss_w;
    result.details.supply_thermal = Some(ThermalDetails::from_loss(
        &loss,
        mass_flow_kg_s(flow_m3_s),
        inlet_c - outlet,
    ));
}

/// Circulation flow (L/min) needed to carry `heat_w` with the allowed drop.
pub fn return_flow_for_heat(heat_w: f64, allowed_drop_c: f64) -> f64 {
    if allowed_drop_c <= 0.0 {
        return 0.0;
    }
    heat_w.max(0.0) / (VOLUMETRIC_HEAT_WH_L_K * allowed_drop_c) / 60.0
}

/// Select the return pipe for the segment's current return flow.
pub fn size_return(result: &mut PipeSegmentResult, material: PipeMaterial, config: &SolverConfig) {
    let flow = result.return_flow_rate_lpm;
    let nominal = select_return_diameter(
        flow,
        material,
        config.return_velocity_band,
        config.min_return_diameter_mm,
    );
    let internal = material.internal_diameter(nominal);
    result.return_nominal_diameter_mm = nominal;
    result.return_actual_diameter_mm = internal;
    result.return_velocity_mps = hn_components::velocity_mps(flow, internal);
}

/// Return pipe heat loss and outlet temperature for a given inlet temperature.
pub fn apply_return_thermal(
    result: &mut PipeSegmentResult,
    length_m: f64,
    inlet_c: f64,
    ambient_c: f64,
    insulation_mm: f64,
) {
    let pipe = InsulatedPipe::new(
        mm(result.return_actual_diameter_mm),
        mm(insulation_mm),
        m(length_m),
    );
    let loss = pipe.heat_loss(inlet_c, ambient_c);

    let flow_m3_s = lpm(result.return_flow_rate_lpm).value.abs();
    let drop = temperature_drop_m3h(loss.heat_loss_w, flow_m3_s * 3600.0);
    let outlet = (inlet_c - drop).max(ambient_c.min(inlet_c));

    result.return_inlet_temperature_c = inlet_c;
    result.return_outlet_temperature_c = outlet;
    result.return_heat_loss_w = loss.heat_loss_w;
    result.details.return_thermal = Some(ThermalDetails::from_loss(
        &loss,
        mass_flow_kg_s(flow_m3_s),
        inlet_c - outlet,
    ));
}
