//! Catalog diameter selection.

use hn_catalog::PipeMaterial;

use crate::common::circle_area;

/// Mean velocity (m/s) of `flow_lpm` through a bore of `internal_mm`.
pub fn velocity_mps(flow_lpm: f64, internal_mm: f64) -> f64 {
    let area = circle_area(internal_mm / 1000.0);
    if area <= 0.0 {
        return 0.0;
    }
    (flow_lpm.abs() / 60_000.0) / area
}

/// Acceptable velocity range for recirculation pipes (m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityBand {
    pub min: f64,
    pub max: f64,
}

impl Default for VelocityBand {
    fn default() -> Self {
        Self { min: 0.2, max: 0.5 }
    }
}

impl VelocityBand {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Smallest catalog diameter (mm) ≥ `min_diameter_mm` keeping velocity ≤ `max_velocity`.
///
/// When nothing qualifies the largest entry is returned, or `min_diameter_mm`
/// itself if it already exceeds the catalog.
pub fn select_optimal_diameter(
    flow_lpm: f64,
    material: PipeMaterial,
    max_velocity: f64,
    min_diameter_mm: f64,
) -> f64 {
    let qualifying = material.diameters().iter().copied().find(|&dn| {
        if dn < min_diameter_mm {
            return false;
        }
        let bore = material.internal_diameter(dn);
        bore > 0.0 && velocity_mps(flow_lpm, bore) <= max_velocity
    });

    match qualifying {
        Some(dn) => dn,
        None => material.largest_diameter().max(min_diameter_mm),
    }
}

/// Return-pipe diameter (mm) targeting a velocity band, never below `floor_mm`.
///
/// Starts from the smallest diameter meeting `band.max`, steps down while the
/// next smaller size stays within the band, then steps up while the velocity
/// still exceeds `band.max`.
pub fn select_return_diameter(
    flow_lpm: f64,
    material: PipeMaterial,
    band: VelocityBand,
    floor_mm: f64,
) -> f64 {
    let table: Vec<f64> = material
        .diameters()
        .iter()
        .copied()
        .filter(|&dn| dn >= floor_mm)
        .collect();
    if table.is_empty() {
        return material.largest_diameter();
    }

    let v = |dn: f64| velocity_mps(flow_lpm, material.internal_diameter(dn));

    let mut idx = table
        .iter()
        .position(|&dn| v(dn) <= band.max)
        .unwrap_or(table.len() - 1);

    while idx > 0 && band.contains(v(table[idx - 1])) {
        idx -= 1;
    }
    while idx + 1 < table.len() && v(table[idx]) > band.max {
        idx += 1;
    }

    table[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wash_basin_on_copper() {
        // 12 L/min: DN12 (10 mm bore) runs at 2.55 m/s, DN14 at 1.77 m/s
        let dn = select_optimal_diameter(12.0, PipeMaterial::Copper, 2.0, 0.0);
        assert_eq!(dn, 14.0);
        assert!(velocity_mps(12.0, PipeMaterial::Copper.internal_diameter(dn)) <= 2.0);
    }

    #[test]
    fn minimum_diameter_is_respected() {
        let dn = select_optimal_diameter(1.0, PipeMaterial::Copper, 2.0, 22.0);
        assert_eq!(dn, 22.0);
    }

    #[test]
    fn oversized_flow_falls_back_to_largest() {
        let dn = select_optimal_diameter(1.0e6, PipeMaterial::Pex, 2.0, 0.0);
        assert_eq!(dn, 63.0);
    }

    #[test]
    fn minimum_above_catalog_is_kept() {
        let dn = select_optimal_diameter(1.0, PipeMaterial::Pex, 2.0, 75.0);
        assert_eq!(dn, 75.0);
    }

    #[test]
    fn zero_flow_takes_smallest_allowed() {
        assert_eq!(select_optimal_diameter(0.0, PipeMaterial::Copper, 2.0, 0.0), 10.0);
        assert_eq!(
            select_return_diameter(0.0, PipeMaterial::Copper, VelocityBand::default(), 10.0),
            10.0
        );
    }

    #[test]
    fn return_diameter_lands_in_band() {
        // 2 L/min: DN10 (8 mm) 0.66 m/s, DN12 (10 mm) 0.42 m/s
        let dn = select_return_diameter(2.0, PipeMaterial::Copper, VelocityBand::default(), 10.0);
        assert_eq!(dn, 12.0);
        let v = velocity_mps(2.0, PipeMaterial::Copper.internal_diameter(dn));
        assert!(VelocityBand::default().contains(v));
    }

    #[test]
    fn return_diameter_never_below_floor() {
        let dn = select_return_diameter(0.05, PipeMaterial::Copper, VelocityBand::default(), 12.0);
        assert_eq!(dn, 12.0);
    }

    #[test]
    fn velocity_of_degenerate_bore_is_zero() {
        assert_eq!(velocity_mps(12.0, 0.0), 0.0);
    }
}
