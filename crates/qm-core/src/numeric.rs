use crate::QmError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, QmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QmError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, QmError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(QmError::OutOfRange {
            what,
            value: v,
            expected: "> 0",
        })
    }
}

/// Finite and zero or greater.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, QmError> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(QmError::OutOfRange {
            what,
            value: v,
            expected: ">= 0",
        })
    }
}

/// Finite and within (0, 1]. Used for efficiencies and drive factors.
pub fn ensure_unit_fraction(v: Real, what: &'static str) -> Result<Real, QmError> {
    ensure_finite(v, what)?;
    if v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err(QmError::OutOfRange {
            what,
            value: v,
            expected: "in (0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn accumulated_steps_match_duration() {
        // 30 steps of 0.01 do not sum to exactly 0.3
        let sum: Real = (0..30).map(|_| 0.01).sum();
        assert!(nearly_equal(sum, 0.3, Tolerances::default()));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "mass").is_err());
        assert!(ensure_positive(-1.0, "mass").is_err());
        assert_eq!(ensure_positive(2.5, "mass"), Ok(2.5));
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert!(ensure_non_negative(0.0, "cda").is_ok());
        assert!(ensure_non_negative(-0.1, "cda").is_err());
        assert!(ensure_non_negative(Real::INFINITY, "cda").is_err());
    }

    #[test]
    fn unit_fraction_bounds() {
        assert!(ensure_unit_fraction(1.0, "eff").is_ok());
        assert!(ensure_unit_fraction(0.5, "eff").is_ok());
        assert!(ensure_unit_fraction(0.0, "eff").is_err());
        assert!(ensure_unit_fraction(1.01, "eff").is_err());
    }
}
