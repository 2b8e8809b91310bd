use crate::HnError;

/// Floating point type used throughout system
pub type Real = f64;

/// Values below this are treated as zero when guarding divisions.
pub const EPSILON: Real = 1e-12;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
}

/// Relative change of `new` with respect to `old`.
///
/// A change away from zero counts as 100 %; zero to zero counts as none.
pub fn relative_change(old: Real, new: Real) -> Real {
    if old.abs() <= EPSILON {
        if new.abs() <= EPSILON { 0.0 } else { 1.0 }
    } else {
        ((new - old) / old).abs()
    }
}
