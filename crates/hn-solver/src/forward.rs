//! Forward pass: bottom-up sizing, then top-down pressures and temperatures.
//!
//! Segments are addressed by forest arena index, which equals their position
//! in the segment slice.

use hn_catalog::{PipeMaterial, fixture_flow_lpm};
use hn_core::SegmentId;
use hn_graph::SegmentForest;
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::network::{NetworkCalculationParameters, NetworkSegment, NetworkType};
use crate::segment::{SegmentInput, apply_pressures, apply_supply_thermal, size_hydraulics};

/// Scalar network parameters, detached from the segment collection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NetworkContext {
    pub network_type: NetworkType,
    pub material: PipeMaterial,
    pub supply_pressure_bar: f64,
    pub required_pressure_bar: f64,
    pub water_temperature_c: f64,
    pub ambient_temperature_c: f64,
    pub insulation_thickness_mm: f64,
    pub nominal_temperature_c: f64,
}

impl NetworkContext {
    pub fn from_params(params: &NetworkCalculationParameters) -> Self {
        Self {
            network_type: params.network_type,
            material: params.material,
            supply_pressure_bar: params.supply_pressure_bar,
            required_pressure_bar: params.required_pressure_bar,
            water_temperature_c: params.water_temperature_c,
            ambient_temperature_c: params.ambient_temperature_c,
            insulation_thickness_mm: params.insulation_thickness_mm,
            nominal_temperature_c: params.nominal_temperature_c(),
        }
    }

    fn segment_input<'a>(
        &self,
        segment: &'a NetworkSegment,
        override_flow_lpm: f64,
        min_diameter_mm: f64,
        config: &'a SolverConfig,
    ) -> SegmentInput<'a> {
        SegmentInput {
            length_m: segment.length_m,
            elevation_m: segment.elevation_m,
            fixtures: &segment.fixtures,
            override_flow_lpm,
            network_type: self.network_type,
            material: self.material,
            required_pressure_bar: self.required_pressure_bar,
            inlet_pressure_bar: self.supply_pressure_bar,
            min_diameter_mm,
            inlet_temperature_c: self.water_temperature_c,
            ambient_temperature_c: self.ambient_temperature_c,
            insulation_thickness_mm: self.insulation_thickness_mm,
            nominal_temperature_c: self.nominal_temperature_c,
            config,
        }
    }
}

/// Which flow carries heat along the supply pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowCarrier {
    /// Fixture draw-off flow
    DrawOff,
    /// Recirculation flow of the loop
    Circulation,
}

/// Phase 1: flow, diameter and hydraulics, children before parents.
///
/// A parent carries the sum of its children's flows plus its own fixtures
/// and is never narrower than its widest child.
pub(crate) fn size_bottom_up(
    forest: &SegmentForest,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    config: &SolverConfig,
) -> SolverResult<()> {
    for &id in forest.post_order() {
        let children = forest.children(id);
        let (children_flow, min_diameter) =
            children.iter().fold((0.0, 0.0_f64), |(flow, diameter), child| {
                let r = &segments[child.index()].result;
                (flow + r.flow_rate_lpm, diameter.max(r.nominal_diameter_mm))
            });

        let segment = &segments[id.index()];
        let override_flow = if children.is_empty() {
            0.0
        } else {
            children_flow + fixture_flow_lpm(&segment.fixtures)
        };
        let input = ctx.segment_input(segment, override_flow, min_diameter, config);
        let result = size_hydraulics(&input)?;
        segments[id.index()].result = result;
    }
    debug!(segments = segments.len(), "bottom-up sizing done");
    Ok(())
}

/// Phase 2: pressures, recommendations and supply temperatures, parents first.
///
/// Roots start from the supply pressure and the production temperature;
/// every other segment starts from its parent's outlet.
pub(crate) fn propagate_top_down(
    forest: &SegmentForest,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    config: &SolverConfig,
) {
    for id in forest.pre_order() {
        let inlet = match forest.parent(id) {
            Some(parent) => segments[parent.index()].outlet_pressure_bar,
            None => ctx.supply_pressure_bar,
        };
        let segment = &mut segments[id.index()];
        segment.inlet_pressure_bar = inlet;
        segment.outlet_pressure_bar = apply_pressures(
            &mut segment.result,
            inlet,
            ctx.required_pressure_bar,
            config,
        );
    }

    if ctx.network_type.is_hot() {
        propagate_supply_temperatures(
            forest,
            forest.pre_order(),
            segments,
            ctx,
            FlowCarrier::DrawOff,
        );
    }
    debug!(segments = segments.len(), "top-down propagation done");
}

/// Supply temperatures and heat losses along `order`, which must list
/// parents before their children.
pub(crate) fn propagate_supply_temperatures(
    forest: &SegmentForest,
    order: impl IntoIterator<Item = SegmentId>,
    segments: &mut [NetworkSegment],
    ctx: &NetworkContext,
    carrier: FlowCarrier,
) {
    for id in order {
        let inlet = match forest.parent(id) {
            Some(parent) => segments[parent.index()].result.outlet_temperature_c,
            None => ctx.water_temperature_c,
        };
        let segment = &mut segments[id.index()];
        let flow = match carrier {
            FlowCarrier::DrawOff => segment.result.flow_rate_lpm,
            FlowCarrier::Circulation => segment.result.return_flow_rate_lpm,
        };
        apply_supply_thermal(
            &mut segment.result,
            segment.length_m,
            inlet,
            ctx.ambient_temperature_c,
            ctx.insulation_thickness_mm,
            flow,
        );
    }
}
