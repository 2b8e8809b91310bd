//! Pipe materials and their catalog tables.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Pipe materials available for domestic water distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PipeMaterial {
    /// Drawn copper tube
    #[default]
    Copper,
    /// Cross-linked polyethylene
    Pex,
    /// Multilayer PE-Al-PE composite
    Multilayer,
    /// Galvanised steel
    Steel,
}

// Nominal sizes in mm, ascending.
const COPPER_DN: [f64; 14] = [
    10.0, 12.0, 14.0, 16.0, 18.0, 22.0, 28.0, 35.0, 42.0, 54.0, 64.0, 76.1, 88.9, 108.0,
];
const PEX_DN: [f64; 8] = [12.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0];
const MULTILAYER_DN: [f64; 9] = [14.0, 16.0, 18.0, 20.0, 26.0, 32.0, 40.0, 50.0, 63.0];
const STEEL_DN: [f64; 9] = [15.0, 20.0, 25.0, 32.0, 40.0, 50.0, 65.0, 80.0, 100.0];

impl PipeMaterial {
    pub const ALL: [PipeMaterial; 4] = [
        PipeMaterial::Copper,
        PipeMaterial::Pex,
        PipeMaterial::Multilayer,
        PipeMaterial::Steel,
    ];

    /// Stable key used in network files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            PipeMaterial::Copper => "copper",
            PipeMaterial::Pex => "pex",
            PipeMaterial::Multilayer => "multilayer",
            PipeMaterial::Steel => "steel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipeMaterial::Copper => "Copper",
            PipeMaterial::Pex => "PEX",
            PipeMaterial::Multilayer => "Multilayer",
            PipeMaterial::Steel => "Galvanised steel",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            PipeMaterial::Copper => &["cu", "cuivre"],
            PipeMaterial::Pex => &["per", "pe-x"],
            PipeMaterial::Multilayer => &["multicouche", "pe-al-pe"],
            PipeMaterial::Steel => &["acier", "galvanized", "galvanised"],
        }
    }

    /// Look a material up by key, display name or alias (case-insensitive).
    pub fn from_key(key: &str) -> Option<PipeMaterial> {
        let query = key.trim().to_ascii_lowercase();
        PipeMaterial::ALL.into_iter().find(|m| {
            m.key() == query
                || m.display_name().to_ascii_lowercase() == query
                || m.aliases().contains(&query.as_str())
        })
    }

    /// Standard nominal diameters (mm), ascending.
    pub fn diameters(&self) -> &'static [f64] {
        match self {
            PipeMaterial::Copper => &COPPER_DN,
            PipeMaterial::Pex => &PEX_DN,
            PipeMaterial::Multilayer => &MULTILAYER_DN,
            PipeMaterial::Steel => &STEEL_DN,
        }
    }

    /// Largest catalogued nominal diameter (mm).
    pub fn largest_diameter(&self) -> f64 {
        let table = self.diameters();
        table[table.len() - 1]
    }

    /// Approximate bore (mm) for a nominal size.
    ///
    /// Wall thickness grows by size tier:
    /// - copper: 1 mm wall up to DN22, 1.5 mm above
    /// - PEX: 2 mm up to 20, 3 mm up to 32, 4 mm above
    /// - multilayer: 2 mm up to 20, 3 mm up to 32, 4.5 mm above
    /// - steel: 1.5 mm up to DN50, 2 mm above
    pub fn internal_diameter(&self, nominal_mm: f64) -> f64 {
        let reduction = match self {
            PipeMaterial::Copper => {
                if nominal_mm <= 22.0 {
                    2.0
                } else {
                    3.0
                }
            }
            PipeMaterial::Pex => {
                if nominal_mm <= 20.0 {
                    4.0
                } else if nominal_mm <= 32.0 {
                    6.0
                } else {
                    8.0
                }
            }
            PipeMaterial::Multilayer => {
                if nominal_mm <= 20.0 {
                    4.0
                } else if nominal_mm <= 32.0 {
                    6.0
                } else {
                    9.0
                }
            }
            PipeMaterial::Steel => {
                if nominal_mm <= 50.0 {
                    3.0
                } else {
                    4.0
                }
            }
        };
        (nominal_mm - reduction).max(0.0)
    }

    /// Absolute roughness (mm).
    pub fn roughness_mm(&self) -> f64 {
        match self {
            PipeMaterial::Copper => 0.0015,
            PipeMaterial::Pex | PipeMaterial::Multilayer => 0.007,
            PipeMaterial::Steel => 0.15,
        }
    }
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PipeMaterial {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipeMaterial::from_key(s).ok_or_else(|| CatalogError::UnknownMaterial { key: s.to_string() })
    }
}

/// Ordered list of standard nominal sizes for a material.
pub fn available_diameters(material: PipeMaterial) -> &'static [f64] {
    material.diameters()
}

/// Bore (mm) of a nominal size in a given material.
pub fn internal_diameter(nominal_mm: f64, material: PipeMaterial) -> f64 {
    material.internal_diameter(nominal_mm)
}

/// Absolute roughness (mm) of a material.
pub fn roughness_mm(material: PipeMaterial) -> f64 {
    material.roughness_mm()
}
