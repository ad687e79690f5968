//! LMS Z-scores with the WHO restricted correction.
//!
//! Inside ±3 SD the Z-score is the plain Box-Cox transform
//! `((y / M)^L - 1) / (L * S)`. Beyond ±3 SD WHO measures the distance past
//! the 3 SD value in units of the 2-3 SD interval on the same side, because
//! the power transform stretches the tails unevenly.

use gizi_model::{Lms, ZScoreResult};

use crate::error::ZScoreError;

/// |z| above which the restricted correction applies.
pub const RESTRICTION_BOUND: f64 = 3.0;

/// Below this |L| the log form of the transform is used.
const LAMBDA_ZERO_EPSILON: f64 = 1e-9;

/// Side of the distribution a restricted Z-score is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    Upper,
    Lower,
}

pub fn validate_lms(lms: &Lms) -> Result<(), ZScoreError> {
    if lms.is_valid() {
        Ok(())
    } else {
        Err(ZScoreError::InvalidLms { lms: *lms })
    }
}

fn validate_observation(observed: f64) -> Result<(), ZScoreError> {
    if observed.is_finite() && observed > 0.0 {
        Ok(())
    } else {
        Err(ZScoreError::InvalidObservation { value: observed })
    }
}

/// Unrestricted Box-Cox Z-score.
pub fn raw_zscore(lms: &Lms, observed: f64) -> Result<f64, ZScoreError> {
    validate_lms(lms)?;
    validate_observation(observed)?;
    let ratio = observed / lms.m;
    let z = if lms.l.abs() < LAMBDA_ZERO_EPSILON {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    };
    Ok(z)
}

/// Measurement value lying exactly `z` SDs from the median.
pub fn value_at_z(lms: &Lms, z: f64) -> Result<f64, ZScoreError> {
    validate_lms(lms)?;
    let value = if lms.l.abs() < LAMBDA_ZERO_EPSILON {
        lms.m * (lms.s * z).exp()
    } else {
        let base = 1.0 + lms.l * lms.s * z;
        if base <= 0.0 {
            return Err(ZScoreError::UndefinedTail { lms: *lms, z });
        }
        lms.m * base.powf(1.0 / lms.l)
    };
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ZScoreError::UndefinedTail { lms: *lms, z })
    }
}

/// WHO restricted Z-score on one tail.
///
/// Upper: `3 + (y - SD3pos) / (SD3pos - SD2pos)`.
/// Lower: `-3 + (y - SD3neg) / (SD2neg - SD3neg)`.
///
/// The result equals ±3 exactly at `y = SD3`, which makes the corrected
/// score continuous with the raw score at the boundary.
pub fn restricted_zscore(lms: &Lms, observed: f64, tail: Tail) -> Result<f64, ZScoreError> {
    validate_observation(observed)?;
    let (sign, bound) = match tail {
        Tail::Upper => (1.0, RESTRICTION_BOUND),
        Tail::Lower => (-1.0, -RESTRICTION_BOUND),
    };
    let sd3 = value_at_z(lms, bound)?;
    let sd2 = value_at_z(lms, bound - sign)?;
    let interval = (sd3 - sd2) * sign;
    if interval <= 0.0 {
        return Err(ZScoreError::UndefinedTail { lms: *lms, z: bound });
    }
    Ok(bound + (observed - sd3) / interval)
}

/// Z-score for `observed` against `lms`, restricted beyond ±3 SD.
pub fn compute_zscore(lms: &Lms, observed: f64) -> Result<ZScoreResult, ZScoreError> {
    let raw = raw_zscore(lms, observed)?;
    if raw > RESTRICTION_BOUND {
        Ok(ZScoreResult {
            value: restricted_zscore(lms, observed, Tail::Upper)?,
            restricted: true,
        })
    } else if raw < -RESTRICTION_BOUND {
        Ok(ZScoreResult {
            value: restricted_zscore(lms, observed, Tail::Lower)?,
            restricted: true,
        })
    } else {
        Ok(ZScoreResult::unrestricted(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHT: Lms = Lms::new(-0.3521, 9.0, 0.11);

    #[test]
    fn median_scores_zero() {
        let result = compute_zscore(&WEIGHT, 9.0).unwrap();
        assert_eq!(result.value, 0.0);
        assert!(!result.restricted);
    }

    #[test]
    fn log_form_when_lambda_is_zero() {
        let lms = Lms::new(0.0, 10.0, 0.1);
        let z = raw_zscore(&lms, 10.0 * (0.1f64 * 1.5).exp()).unwrap();
        assert!((z - 1.5).abs() < 1e-12);
        assert!((value_at_z(&lms, -2.0).unwrap() - 10.0 * (-0.2f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn value_at_z_inverts_transform() {
        for z in [-3.0, -2.0, -0.5, 0.0, 1.0, 2.5, 3.0] {
            let y = value_at_z(&WEIGHT, z).unwrap();
            assert!((raw_zscore(&WEIGHT, y).unwrap() - z).abs() < 1e-9);
        }
    }

    #[test]
    fn upper_tail_is_linearized() {
        let sd3 = value_at_z(&WEIGHT, 3.0).unwrap();
        let sd2 = value_at_z(&WEIGHT, 2.0).unwrap();
        let observed = sd3 + (sd3 - sd2) * 0.5;
        let result = compute_zscore(&WEIGHT, observed).unwrap();
        assert!(result.restricted);
        assert!((result.value - 3.5).abs() < 1e-9);
        // the raw transform understates this tail for negative L
        assert!(raw_zscore(&WEIGHT, observed).unwrap() < 3.5);
    }

    #[test]
    fn lower_tail_is_linearized() {
        let sd3 = value_at_z(&WEIGHT, -3.0).unwrap();
        let sd2 = value_at_z(&WEIGHT, -2.0).unwrap();
        let observed = sd3 - (sd2 - sd3) * 0.5;
        let result = compute_zscore(&WEIGHT, observed).unwrap();
        assert!(result.restricted);
        assert!((result.value + 3.5).abs() < 1e-9);
    }

    #[test]
    fn restricted_is_exactly_three_at_sd3() {
        let sd3 = value_at_z(&WEIGHT, 3.0).unwrap();
        let z = restricted_zscore(&WEIGHT, sd3, Tail::Upper).unwrap();
        assert!((z - 3.0).abs() < 1e-12);
        let sd3neg = value_at_z(&WEIGHT, -3.0).unwrap();
        let z = restricted_zscore(&WEIGHT, sd3neg, Tail::Lower).unwrap();
        assert!((z + 3.0).abs() < 1e-12);
    }

    #[test]
    fn corrupt_rows_are_reference_errors() {
        let err = compute_zscore(&Lms::new(0.1, 0.0, 0.1), 5.0).unwrap_err();
        assert!(matches!(err, ZScoreError::InvalidLms { .. }));
        assert!(err.is_reference_error());

        let err = compute_zscore(&Lms::new(0.1, 5.0, -0.1), 5.0).unwrap_err();
        assert!(err.is_reference_error());
    }

    #[test]
    fn non_positive_observation_is_input_error() {
        let err = compute_zscore(&WEIGHT, 0.0).unwrap_err();
        assert!(matches!(err, ZScoreError::InvalidObservation { .. }));
        assert!(!err.is_reference_error());
        assert!(compute_zscore(&WEIGHT, f64::NAN).is_err());
    }

    #[test]
    fn undefined_lower_tail_is_reported() {
        // 1 + L*S*(-3) <= 0
        let lms = Lms::new(2.0, 10.0, 0.2);
        assert!(matches!(
            value_at_z(&lms, -3.0),
            Err(ZScoreError::UndefinedTail { .. })
        ));
    }
}
