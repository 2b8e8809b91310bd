//! Integration tests for hn-catalog lookups.

use hn_catalog::{
    Fixture, FixtureKind, PipeMaterial, available_diameters, fixture_flow_lpm, internal_diameter,
    simultaneity_coefficient,
};

#[test]
fn copper_catalog_starts_at_dn10() {
    let table = available_diameters(PipeMaterial::Copper);
    assert_eq!(&table[..6], &[10.0, 12.0, 14.0, 16.0, 18.0, 22.0]);
    assert_eq!(PipeMaterial::Copper.largest_diameter(), 108.0);
}

#[test]
fn bathroom_probable_flow() {
    // basin + shower + WC: three units, coefficient 0.7
    let fixtures = [
        Fixture::new(FixtureKind::WashBasin, 1),
        Fixture::new(FixtureKind::Shower, 1),
        Fixture::new(FixtureKind::Wc, 1),
    ];
    let expected = (12.0 + 18.0 + 7.2) * 0.7;
    assert!((fixture_flow_lpm(&fixtures) - expected).abs() < 1e-9);
}

#[test]
fn quantity_counts_towards_coefficient() {
    let grouped = [Fixture::new(FixtureKind::WashBasin, 5)];
    assert!((fixture_flow_lpm(&grouped) - 60.0 * simultaneity_coefficient(5)).abs() < 1e-9);
}

#[test]
fn every_material_has_usable_bores() {
    for material in PipeMaterial::ALL {
        let smallest = available_diameters(material)[0];
        assert!(internal_diameter(smallest, material) > 0.0);
    }
}
