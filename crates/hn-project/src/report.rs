//! Serializable calculation report.

use serde::{Deserialize, Serialize};

use hn_solver::{LoopReport, NetworkCalculationParameters, NetworkOutcome, NetworkSegment};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkReport {
    pub name: String,
    pub network_type: String,
    pub material: String,
    pub segment_count: usize,
    pub loop_length_m: f64,
    pub source_flow_lpm: f64,
    pub total_heat_loss_w: f64,
    pub total_return_heat_loss_w: f64,
    pub lowest_outlet_pressure_bar: Option<f64>,
    pub critical_segment_id: Option<String>,
    pub warning_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_summary: Option<LoopSummary>,
    pub segments: Vec<SegmentReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopSummary {
    pub iterations: usize,
    pub converged: bool,
    pub max_relative_change: f64,
    pub repairs: Vec<RepairSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairSummary {
    pub root_id: String,
    pub attempts: usize,
    pub satisfied: bool,
    pub final_deficit_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentReport {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    pub length_m: f64,
    pub flow_rate_lpm: f64,
    pub nominal_diameter_mm: f64,
    pub actual_diameter_mm: f64,
    pub velocity_mps: f64,
    pub pressure_drop_mce: f64,
    pub reynolds: f64,
    pub regime: String,
    pub friction_factor: f64,
    pub inlet_pressure_bar: f64,
    pub outlet_pressure_bar: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<SupplyThermalReport>,
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub return_path: Option<ReturnReport>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyThermalReport {
    pub inlet_temperature_c: f64,
    pub outlet_temperature_c: f64,
    pub heat_loss_w: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnReport {
    pub flow_rate_lpm: f64,
    pub nominal_diameter_mm: f64,
    pub actual_diameter_mm: f64,
    pub velocity_mps: f64,
    pub inlet_temperature_c: f64,
    pub outlet_temperature_c: f64,
    pub heat_loss_w: f64,
}

impl NetworkReport {
    pub fn new(
        name: impl Into<String>,
        params: &NetworkCalculationParameters,
        outcome: &NetworkOutcome,
    ) -> Self {
        let summary = &outcome.summary;
        let hot = params.network_type.is_hot();
        let with_loop = params.network_type.has_loop();
        Self {
            name: name.into(),
            network_type: params.network_type.key().to_string(),
            material: params.material.key().to_string(),
            segment_count: summary.segment_count,
            loop_length_m: summary.loop_length_m,
            source_flow_lpm: summary.source_flow_lpm,
            total_heat_loss_w: summary.total_heat_loss_w,
            total_return_heat_loss_w: summary.total_return_heat_loss_w,
            lowest_outlet_pressure_bar: summary.lowest_outlet_pressure_bar,
            critical_segment_id: summary.critical_segment_id.clone(),
            warning_count: summary.warning_count,
            loop_summary: outcome.loop_report.as_ref().map(LoopSummary::from),
            segments: params
                .segments
                .iter()
                .map(|s| SegmentReport::new(s, hot, with_loop))
                .collect(),
        }
    }
}

impl From<&LoopReport> for LoopSummary {
    fn from(report: &LoopReport) -> Self {
        Self {
            iterations: report.iterations,
            converged: report.converged,
            max_relative_change: report.max_relative_change,
            repairs: report
                .repairs
                .iter()
                .map(|r| RepairSummary {
                    root_id: r.root_id.clone(),
                    attempts: r.attempts,
                    satisfied: r.satisfied,
                    final_deficit_c: r.final_deficit_c,
                })
                .collect(),
        }
    }
}

impl SegmentReport {
    pub fn new(segment: &NetworkSegment, hot: bool, with_loop: bool) -> Self {
        let r = &segment.result;
        Self {
            id: segment.id.clone(),
            parent: segment.parent_id.clone(),
            length_m: segment.length_m,
            flow_rate_lpm: r.flow_rate_lpm,
            nominal_diameter_mm: r.nominal_diameter_mm,
            actual_diameter_mm: r.actual_diameter_mm,
            velocity_mps: r.velocity_mps,
            pressure_drop_mce: r.pressure_drop_mce,
            reynolds: r.details.reynolds,
            regime: r.details.regime.as_str().to_string(),
            friction_factor: r.details.friction_factor,
            inlet_pressure_bar: segment.inlet_pressure_bar,
            outlet_pressure_bar: segment.outlet_pressure_bar,
            supply: hot.then(|| SupplyThermalReport {
                inlet_temperature_c: r.inlet_temperature_c,
                outlet_temperature_c: r.outlet_temperature_c,
                heat_loss_w: r.heat_loss_w,
            }),
            return_path: with_loop.then(|| ReturnReport {
                flow_rate_lpm: r.return_flow_rate_lpm,
                nominal_diameter_mm: r.return_nominal_diameter_mm,
                actual_diameter_mm: r.return_actual_diameter_mm,
                velocity_mps: r.return_velocity_mps,
                inlet_temperature_c: r.return_inlet_temperature_c,
                outlet_temperature_c: r.return_outlet_temperature_c,
                heat_loss_w: r.return_heat_loss_w,
            }),
            recommendation: r.recommendation.clone(),
        }
    }
}
