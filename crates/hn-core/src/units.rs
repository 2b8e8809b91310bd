// hn-core/src/units.rs

use uom::si::f64::{Length as UomLength, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn lpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_minute;
    VolumeRate::new::<liter_per_minute>(v)
}

/// Plumbing practice mixes bar and metres of water column (mCE).
///
/// The engine uses the fixed conversion 1 bar = 10 mCE.
pub const MCE_PER_BAR: f64 = 10.0;

#[inline]
pub fn mce_to_bar(head_mce: f64) -> f64 {
    head_mce / MCE_PER_BAR
}

pub mod constants {
    /// Standard gravity in m/s².
    pub const G0_MPS2: f64 = 9.806_65;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_and_litres() {
        assert!((mm(22.0).value - 0.022).abs() < 1e-12);
        assert!((m(2.0).value - 2.0).abs() < 1e-12);
        // 60 L/min = 1 L/s = 1e-3 m3/s
        assert!((lpm(60.0).value - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn head_conversion() {
        assert_eq!(mce_to_bar(10.0), 1.0);
        assert_eq!(mce_to_bar(0.0), 0.0);
    }
}
