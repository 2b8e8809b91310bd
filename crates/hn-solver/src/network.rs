//! Network input model: segments, fixtures and whole-network parameters.

use std::fmt;

use hn_catalog::{Fixture, PipeMaterial};

use crate::result::PipeSegmentResult;

/// Kind of distribution network being sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkType {
    #[default]
    ColdWater,
    HotWater,
    /// Hot water with a recirculation return path.
    HotWaterLoop,
}

impl NetworkType {
    pub const ALL: [NetworkType; 3] = [
        NetworkType::ColdWater,
        NetworkType::HotWater,
        NetworkType::HotWaterLoop,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NetworkType::ColdWater => "cold_water",
            NetworkType::HotWater => "hot_water",
            NetworkType::HotWaterLoop => "hot_water_loop",
        }
    }

    pub fn from_key(key: &str) -> Option<NetworkType> {
        let normalized = key.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        NetworkType::ALL
            .into_iter()
            .find(|t| t.key() == normalized)
    }

    /// Whether supply temperatures and heat losses are computed.
    pub fn is_hot(&self) -> bool {
        matches!(self, NetworkType::HotWater | NetworkType::HotWaterLoop)
    }

    pub fn has_loop(&self) -> bool {
        matches!(self, NetworkType::HotWaterLoop)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A pipe run in the distribution forest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSegment {
    pub id: String,
    /// Empty for a root fed directly by the source.
    pub parent_id: String,
    pub length_m: f64,
    /// Signed elevation change; negative when the pipe descends.
    pub elevation_m: f64,
    /// Fixtures attached to this segment only, descendants excluded.
    pub fixtures: Vec<Fixture>,
    pub result: PipeSegmentResult,
    pub inlet_pressure_bar: f64,
    pub outlet_pressure_bar: f64,
}

impl NetworkSegment {
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>, length_m: f64) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            length_m,
            ..Self::default()
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = elevation_m;
        self
    }

    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixtures.push(fixture);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }

    /// Clear every computed value.
    pub fn reset(&mut self) {
        self.result = PipeSegmentResult::default();
        self.inlet_pressure_bar = 0.0;
        self.outlet_pressure_bar = 0.0;
    }
}

/// Whole-network input.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCalculationParameters {
    pub network_type: NetworkType,
    pub material: PipeMaterial,
    /// Pressure at the source (bar)
    pub supply_pressure_bar: f64,
    /// Pressure required at every draw-off point (bar)
    pub required_pressure_bar: f64,
    /// Hot water production temperature (°C)
    pub water_temperature_c: f64,
    pub ambient_temperature_c: f64,
    pub insulation_thickness_mm: f64,
    /// Mains temperature used for cold water viscosity (°C)
    pub cold_water_temperature_c: f64,
    pub segments: Vec<NetworkSegment>,
}

impl Default for NetworkCalculationParameters {
    fn default() -> Self {
        Self {
            network_type: NetworkType::ColdWater,
            material: PipeMaterial::Copper,
            supply_pressure_bar: 3.0,
            required_pressure_bar: 1.0,
            water_temperature_c: 60.0,
            ambient_temperature_c: 20.0,
            insulation_thickness_mm: 13.0,
            cold_water_temperature_c: 10.0,
            segments: Vec::new(),
        }
    }
}

impl NetworkCalculationParameters {
    /// Developed length of the whole network (m).
    pub fn loop_length_m(&self) -> f64 {
        self.segments.iter().fold(0.0, |acc, s| acc + s.length_m)
    }

    /// Temperature at which water properties are evaluated (°C).
    pub fn nominal_temperature_c(&self) -> f64 {
        if self.network_type.is_hot() {
            self.water_temperature_c
        } else {
            self.cold_water_temperature_c
        }
    }

    pub fn segment(&self, id: &str) -> Option<&NetworkSegment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_catalog::FixtureKind;

    #[test]
    fn network_type_keys() {
        for t in NetworkType::ALL {
            assert_eq!(NetworkType::from_key(t.key()), Some(t));
        }
        assert_eq!(
            NetworkType::from_key("Hot-Water-Loop"),
            Some(NetworkType::HotWaterLoop)
        );
        assert_eq!(NetworkType::from_key("steam"), None);
    }

    #[test]
    fn loop_length_is_derived() {
        let params = NetworkCalculationParameters {
            segments: vec![
                NetworkSegment::new("a", "", 12.5),
                NetworkSegment::new("b", "a", 7.5),
            ],
            ..Default::default()
        };
        assert_eq!(params.loop_length_m(), 20.0);
    }

    #[test]
    fn segment_builder_helpers() {
        let seg = NetworkSegment::new("s", "", 3.0)
            .with_elevation(-1.5)
            .with_fixture(Fixture::new(FixtureKind::Shower, 2));
        assert!(seg.is_root());
        assert_eq!(seg.elevation_m, -1.5);
        assert_eq!(seg.fixtures.len(), 1);
    }

    #[test]
    fn nominal_temperature_follows_network_type() {
        let mut params = NetworkCalculationParameters::default();
        assert_eq!(params.nominal_temperature_c(), 10.0);
        params.network_type = NetworkType::HotWater;
        assert_eq!(params.nominal_temperature_c(), 60.0);
    }
}
