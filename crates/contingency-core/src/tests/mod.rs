//! Categorical hypothesis tests
//!
//! - Chi-square test of independence on R x C contingency tables
//! - Chi-square goodness-of-fit
//! - McNemar's test for paired nominal data
//! - Cochran's Q test for repeated binary measurements

pub mod goodness_of_fit;

pub use cochran::CochranQ;
pub use contingency::{AssociationMeasures, ChiSquareContingency, ChiSquareOptions};
pub use goodness_of_fit::chisq_goodness_of_fit;
pub use mcnemar::{McNemarOptions, McNemarTest};

/// Chi-square test result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChiSquareResult {
    /// Chi-square statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Method name
    pub method: String,
}
