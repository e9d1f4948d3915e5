//! Distribution functions backed by statrs

use crate::errors::{StatsError, StatsResult};
use statrs::distribution::{Binomial, ChiSquared, ContinuousCDF, Discrete, DiscreteCDF};

/// Upper-tail probability `P(X >= statistic)` of a chi-square distribution.
///
/// Uses the survival function directly so that p-values far below machine
/// epsilon are not lost to `1 - cdf` cancellation.
pub(crate) fn chi_square_sf(statistic: f64, df: f64) -> StatsResult<f64> {
    let dist = ChiSquared::new(df).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.sf(statistic))
}

fn binomial(n: u64, p: f64) -> StatsResult<Binomial> {
    Binomial::new(p, n).map_err(|e| StatsError::Distribution(e.to_string()))
}

/// `P(X = k)` for `X ~ Binomial(n, p)`
pub(crate) fn binomial_pmf(k: u64, n: u64, p: f64) -> StatsResult<f64> {
    Ok(binomial(n, p)?.pmf(k))
}

/// `P(X <= k)` for `X ~ Binomial(n, p)`
pub(crate) fn binomial_cdf(k: u64, n: u64, p: f64) -> StatsResult<f64> {
    Ok(binomial(n, p)?.cdf(k))
}
