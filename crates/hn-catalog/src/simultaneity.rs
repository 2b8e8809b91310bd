//! Simultaneity coefficient and fixture flow aggregation.

use crate::fixture::Fixture;

/// Discount applied to the sum of peak fixture flows.
///
/// 1.0 for a single unit, 0.8 for two, 0.7 for three, `1/sqrt(n-1)` beyond.
pub fn simultaneity_coefficient(n: u32) -> f64 {
    match n {
        0 | 1 => 1.0,
        2 => 0.8,
        3 => 0.7,
        _ => 1.0 / f64::from(n - 1).sqrt(),
    }
}

/// Total number of units across a fixture list, saturating at `u32::MAX`.
pub fn total_quantity(fixtures: &[Fixture]) -> u32 {
    fixtures
        .iter()
        .fold(0_u32, |acc, f| acc.saturating_add(f.quantity()))
}

/// Sum of peak flows (L/min) before the coefficient.
///
/// An empty list gives `+0.0`.
pub fn base_flow_lpm(fixtures: &[Fixture]) -> f64 {
    fixtures.iter().fold(0.0, |acc, f| acc + f.peak_flow_lpm())
}

/// Probable flow (L/min): peak sum times the simultaneity coefficient.
pub fn fixture_flow_lpm(fixtures: &[Fixture]) -> f64 {
    base_flow_lpm(fixtures) * simultaneity_coefficient(total_quantity(fixtures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixtureKind;

    #[test]
    fn coefficient_table() {
        assert_eq!(simultaneity_coefficient(0), 1.0);
        assert_eq!(simultaneity_coefficient(1), 1.0);
        assert_eq!(simultaneity_coefficient(2), 0.8);
        assert_eq!(simultaneity_coefficient(3), 0.7);
        assert!((simultaneity_coefficient(5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fixture_flow_applies_coefficient() {
        let fixtures = [
            Fixture::new(FixtureKind::WashBasin, 1),
            Fixture::new(FixtureKind::Shower, 1),
        ];
        assert_eq!(total_quantity(&fixtures), 2);
        assert_eq!(base_flow_lpm(&fixtures), 30.0);
        assert!((fixture_flow_lpm(&fixtures) - 24.0).abs() < 1e-12);
        assert_eq!(fixture_flow_lpm(&[]), 0.0);
    }

    #[test]
    fn empty_list_has_positive_zero_flow() {
        assert!(base_flow_lpm(&[]).is_sign_positive());
        assert!(fixture_flow_lpm(&[]).is_sign_positive());
        assert_eq!(total_quantity(&[]), 0);
    }

    #[test]
    fn huge_quantities_saturate() {
        let fixtures = [
            Fixture::new(FixtureKind::Wc, u32::MAX),
            Fixture::new(FixtureKind::Wc, 2),
        ];
        assert_eq!(total_quantity(&fixtures), u32::MAX);
        assert!(fixture_flow_lpm(&fixtures).is_finite());
    }
}
