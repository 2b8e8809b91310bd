//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hn_core::numeric::ensure_finite;

/// Flows below this (m³/s) are treated as no flow.
pub const EPSILON_FLOW: f64 = 1e-12;

/// Diameters below this (m) are treated as degenerate.
pub const EPSILON_DIAMETER: f64 = 1e-9;

/// Reynolds number below which flow is laminar.
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Circular cross-section (m²) of a bore given in metres.
pub fn circle_area(diameter_m: f64) -> f64 {
    if diameter_m <= EPSILON_DIAMETER {
        0.0
    } else {
        std::f64::consts::PI * diameter_m * diameter_m / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_area() {
        assert_eq!(circle_area(0.0), 0.0);
        assert_eq!(circle_area(-1.0), 0.0);
        assert!((circle_area(0.02) - 3.141_592_653_589_793e-4).abs() < 1e-12);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }
}
