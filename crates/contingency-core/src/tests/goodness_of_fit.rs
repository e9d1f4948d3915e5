//! Chi-square goodness-of-fit test

use super::ChiSquareResult;
use crate::distributions::chi_square_sf;
use crate::errors::{StatsError, StatsResult};

/// Chi-square goodness-of-fit test
///
/// Tests whether observed category counts match expected frequencies.
///
/// # Arguments
/// * `observed` - Observed counts (at least 2 categories)
/// * `expected` - Expected frequencies or proportions, rescaled to the
///   observed total; `None` tests against a uniform distribution
pub fn chisq_goodness_of_fit(
    observed: &[f64],
    expected: Option<&[f64]>,
) -> StatsResult<ChiSquareResult> {
    if observed.len() < 2 {
        return Err(StatsError::InsufficientDataMsg(
            "Goodness-of-fit test requires at least 2 categories".into(),
        ));
    }
    if let Some(&value) = observed.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(StatsError::InvalidValue {
            field: "observed",
            value,
            reason: "counts must be finite and non-negative",
        });
    }

    let total: f64 = observed.iter().sum();
    if total <= 0.0 {
        return Err(StatsError::InvalidInput("Observed counts sum to zero".into()));
    }

    let uniform = expected.is_none();
    let expected: Vec<f64> = match expected {
        Some(expected) => {
            if expected.len() != observed.len() {
                return Err(StatsError::DimensionMismatchMsg(
                    "Observed and expected must have same length".into(),
                ));
            }
            if let Some(&value) = expected.iter().find(|v| !v.is_finite() || **v <= 0.0) {
                return Err(StatsError::InvalidValue {
                    field: "expected",
                    value,
                    reason: "expected frequencies must be positive",
                });
            }
            let expected_total: f64 = expected.iter().sum();
            expected.iter().map(|e| e * total / expected_total).collect()
        }
        None => vec![total / observed.len() as f64; observed.len()],
    };

    let statistic: f64 = observed
        .iter()
        .zip(&expected)
        .map(|(o, e)| (o - e) * (o - e) / e)
        .sum();
    let df = observed.len() - 1;
    let p_value = chi_square_sf(statistic, df as f64)?;

    log::debug!(
        "goodness-of-fit on {} categories: x2={}, p={}",
        observed.len(),
        statistic,
        p_value
    );

    Ok(ChiSquareResult {
        statistic,
        p_value,
        df,
        method: if uniform {
            "Chi-square goodness-of-fit test (uniform)".into()
        } else {
            "Chi-square goodness-of-fit test".into()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform() {
        // x2 = (25 + 25 + 0) / 20
        let result = chisq_goodness_of_fit(&[15.0, 25.0, 20.0], None).unwrap();
        assert_relative_eq!(result.statistic, 2.5, epsilon = 1e-12);
        assert_eq!(result.df, 2);
        assert_relative_eq!(result.p_value, (-1.25_f64).exp(), epsilon = 1e-9);
        assert_eq!(result.method, "Chi-square goodness-of-fit test (uniform)");
    }

    #[test]
    fn test_expected_proportions_are_rescaled() {
        let observed = [30.0, 50.0, 20.0];
        let proportions = chisq_goodness_of_fit(&observed, Some(&[0.25, 0.5, 0.25][..])).unwrap();
        let counts = chisq_goodness_of_fit(&observed, Some(&[25.0, 50.0, 25.0][..])).unwrap();

        // (25 + 0 + 25) / 25
        assert_relative_eq!(proportions.statistic, 2.0, epsilon = 1e-12);
        assert_relative_eq!(proportions.statistic, counts.statistic, epsilon = 1e-12);
        assert_eq!(proportions.method, "Chi-square goodness-of-fit test");
    }

    #[test]
    fn test_goodness_of_fit_exceptions() {
        assert!(chisq_goodness_of_fit(&[5.0], None).is_err());
        assert!(chisq_goodness_of_fit(&[0.0, 0.0], None).is_err());
        assert!(chisq_goodness_of_fit(&[1.0, -2.0], None).is_err());
        assert!(matches!(
            chisq_goodness_of_fit(&[1.0, 2.0], Some(&[1.0][..])),
            Err(StatsError::DimensionMismatchMsg(_))
        ));
        assert!(matches!(
            chisq_goodness_of_fit(&[1.0, 2.0], Some(&[1.0, 0.0][..])),
            Err(StatsError::InvalidValue { .. })
        ));
    }
}
