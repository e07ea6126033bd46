use crate::DhError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DhError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DhError::NonFinite { what, value: v })
    }
}

pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, DhError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(DhError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

/// Bit pattern used to compare coordinates for exact equality.
///
/// `-0.0` folds onto `0.0` so that values comparing equal as floats share a key.
pub fn exact_bits(v: Real) -> u64 {
    if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert!(ensure_non_negative(0.0, "tol").is_ok());
        assert!(matches!(
            ensure_non_negative(-0.5, "tol"),
            Err(DhError::Negative { .. })
        ));
        assert!(ensure_non_negative(Real::INFINITY, "tol").is_err());
    }

    #[test]
    fn exact_bits_folds_signed_zero() {
        assert_eq!(exact_bits(0.0), exact_bits(-0.0));
        assert_ne!(exact_bits(1.0), exact_bits(1.0 + f64::EPSILON));
    }
}
