//! Network file schema.
//!
//! A plain serde mirror of the solver input. Materials, fixtures and the
//! network type are stored by key so files stay readable and diffable.

use serde::{Deserialize, Serialize};

/// Current file format version.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkFile {
    pub version: u32,
    pub name: String,
    pub network: NetworkDef,
    #[serde(default, skip_serializing_if = "SolverDef::is_empty")]
    pub solver: SolverDef,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    /// `cold_water`, `hot_water` or `hot_water_loop`
    #[serde(rename = "type")]
    pub network_type: String,
    pub material: String,
    pub supply_pressure_bar: f64,
    pub required_pressure_bar: f64,
    #[serde(default = "default_water_temperature")]
    pub water_temperature_c: f64,
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature_c: f64,
    #[serde(default = "default_insulation")]
    pub insulation_thickness_mm: f64,
    #[serde(default = "default_cold_water_temperature")]
    pub cold_water_temperature_c: f64,
}

fn default_water_temperature() -> f64 {
    60.0
}

fn default_ambient_temperature() -> f64 {
    20.0
}

fn default_insulation() -> f64 {
    13.0
}

fn default_cold_water_temperature() -> f64 {
    10.0
}

/// Optional overrides of the solver thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_velocity_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_velocity_loop_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagnation_velocity_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub singular_loss_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_temperature_drop_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_velocity_min_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_velocity_max_mps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_return_diameter_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loop_iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_repair_attempts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_tolerance_c: Option<f64>,
}

impl SolverDef {
    pub fn is_empty(&self) -> bool {
        *self == SolverDef::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentDef {
    pub id: String,
    /// Empty or absent for a root.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
    pub length_m: f64,
    #[serde(default)]
    pub elevation_m: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixtures: Vec<FixtureDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureDef {
    /// Fixture key, e.g. `shower` or `wash_basin`
    pub kind: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
