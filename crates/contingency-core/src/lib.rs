//! contingency-core: categorical hypothesis tests on count tables
//!
//! This crate provides the chi-square test of independence, McNemar's test
//! and Cochran's Q test, together with the margin utilities they share.
//! Distribution functions come from statrs; tables are stored as faer
//! matrices.

mod distributions;
pub mod errors;
pub mod margins;
pub mod tests;
pub mod types;

pub use errors::{StatsError, StatsResult};
pub use margins::{expected_frequencies, table_margins, Margins};
pub use tests::{
    chisq_goodness_of_fit, AssociationMeasures, ChiSquareContingency, ChiSquareOptions,
    ChiSquareResult, CochranQ, McNemarOptions, McNemarTest,
};
pub use types::{IntoTable, ShapedArray, Table};
