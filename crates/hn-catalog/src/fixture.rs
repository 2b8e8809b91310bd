//! Sanitary fixture types.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Sanitary appliance types with a code-mandated unit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    WashBasin,
    Shower,
    Bathtub,
    Wc,
    Bidet,
    KitchenSink,
    WashingMachine,
    Dishwasher,
    Urinal,
    UtilitySink,
    GardenTap,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 11] = [
        FixtureKind::WashBasin,
        FixtureKind::Shower,
        FixtureKind::Bathtub,
        FixtureKind::Wc,
        FixtureKind::Bidet,
        FixtureKind::KitchenSink,
        FixtureKind::WashingMachine,
        FixtureKind::Dishwasher,
        FixtureKind::Urinal,
        FixtureKind::UtilitySink,
        FixtureKind::GardenTap,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FixtureKind::WashBasin => "wash_basin",
            FixtureKind::Shower => "shower",
            FixtureKind::Bathtub => "bathtub",
            FixtureKind::Wc => "wc",
            FixtureKind::Bidet => "bidet",
            FixtureKind::KitchenSink => "kitchen_sink",
            FixtureKind::WashingMachine => "washing_machine",
            FixtureKind::Dishwasher => "dishwasher",
            FixtureKind::Urinal => "urinal",
            FixtureKind::UtilitySink => "utility_sink",
            FixtureKind::GardenTap => "garden_tap",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FixtureKind::WashBasin => "Wash-basin",
            FixtureKind::Shower => "Shower",
            FixtureKind::Bathtub => "Bathtub",
            FixtureKind::Wc => "WC",
            FixtureKind::Bidet => "Bidet",
            FixtureKind::KitchenSink => "Kitchen sink",
            FixtureKind::WashingMachine => "Washing machine",
            FixtureKind::Dishwasher => "Dishwasher",
            FixtureKind::Urinal => "Urinal",
            FixtureKind::UtilitySink => "Utility sink",
            FixtureKind::GardenTap => "Garden tap",
        }
    }

    /// Unit flow rate (L/min) from the national plumbing code table.
    pub fn base_flow_lpm(&self) -> f64 {
        match self {
            FixtureKind::WashBasin => 12.0,
            FixtureKind::Shower => 18.0,
            FixtureKind::Bathtub => 19.8,
            FixtureKind::Wc => 7.2,
            FixtureKind::Bidet => 12.0,
            FixtureKind::KitchenSink => 12.0,
            FixtureKind::WashingMachine => 12.0,
            FixtureKind::Dishwasher => 6.0,
            FixtureKind::Urinal => 9.0,
            FixtureKind::UtilitySink => 12.0,
            FixtureKind::GardenTap => 19.8,
        }
    }

    /// Look a fixture up by key or display name; `-`, ` ` and `_` are interchangeable.
    pub fn from_key(key: &str) -> Option<FixtureKind> {
        let normalize = |s: &str| s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let query = normalize(key);
        FixtureKind::ALL
            .into_iter()
            .find(|k| k.key() == query || normalize(k.display_name()) == query)
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FixtureKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixtureKind::from_key(s).ok_or_else(|| CatalogError::UnknownFixture { key: s.to_string() })
    }
}

/// Fixture unit fed by a pipe segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixture {
    kind: FixtureKind,
    quantity: u32,
}

impl Fixture {
    pub fn new(kind: FixtureKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }

    pub fn kind(&self) -> FixtureKind {
        self.kind
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit flow (L/min), independent of quantity.
    pub fn flow_lpm(&self) -> f64 {
        self.kind.base_flow_lpm()
    }

    /// Peak flow of all units together, before simultaneity (L/min).
    pub fn peak_flow_lpm(&self) -> f64 {
        self.flow_lpm() * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_table_values() {
        assert_eq!(FixtureKind::Wc.base_flow_lpm(), 7.2);
        assert_eq!(FixtureKind::Shower.base_flow_lpm(), 18.0);
        assert_eq!(FixtureKind::WashBasin.base_flow_lpm(), 12.0);
    }

    #[test]
    fn keys_round_trip() {
        for kind in FixtureKind::ALL {
            assert_eq!(FixtureKind::from_key(kind.key()), Some(kind));
            assert_eq!(kind.display_name().parse::<FixtureKind>().unwrap(), kind);
        }
        assert_eq!(FixtureKind::from_key("Wash basin"), Some(FixtureKind::WashBasin));
        assert!("jacuzzi".parse::<FixtureKind>().is_err());
    }

    #[test]
    fn peak_flow_scales_with_quantity() {
        let f = Fixture::new(FixtureKind::Shower, 3);
        assert_eq!(f.flow_lpm(), 18.0);
        assert_eq!(f.peak_flow_lpm(), 54.0);
    }
}
