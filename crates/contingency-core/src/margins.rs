//! Table margins and expected frequencies under independence

use crate::errors::{StatsError, StatsResult};
use crate::types::{IntoTable, Table};

/// Row sums, column sums and grand total of a table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Margins {
    /// Sum of each row (a single entry for 1-D input)
    pub row_sums: Vec<f64>,
    /// Sum of each column (the vector itself for 1-D input)
    pub col_sums: Vec<f64>,
    /// Sum of all cells
    pub total: f64,
}

impl Table {
    /// Compute row sums, column sums and the grand total.
    pub fn margins(&self) -> Margins {
        let (n_rows, n_cols) = self.shape();
        let mut row_sums = vec![0.0; n_rows];
        let mut col_sums = vec![0.0; n_cols];

        for (i, row_sum) in row_sums.iter_mut().enumerate() {
            for (j, col_sum) in col_sums.iter_mut().enumerate() {
                let value = self.get(i, j);
                *row_sum += value;
                *col_sum += value;
            }
        }

        let total = row_sums.iter().sum();
        Margins {
            row_sums,
            col_sums,
            total,
        }
    }

    /// Expected cell counts if rows and columns were independent:
    /// `row_sum[i] * col_sum[j] / total`.
    pub fn expected_frequencies(&self) -> StatsResult<Table> {
        let margins = self.margins();
        if margins.total <= 0.0 {
            return Err(StatsError::InvalidInput(
                "Expected frequencies are undefined for a table with zero total".into(),
            ));
        }

        Ok(Table::from_fn(self.nrows(), self.ncols(), |i, j| {
            margins.row_sums[i] * margins.col_sums[j] / margins.total
        }))
    }
}

/// Row sums, column sums and grand total of a 1-D or 2-D table
///
/// # Arguments
/// * `table` - Anything convertible to a [`Table`]
pub fn table_margins(table: impl IntoTable) -> StatsResult<Margins> {
    Ok(table.into_table()?.margins())
}

/// Expected frequencies of a 1-D or 2-D table under independence
///
/// The result has the same shape as the input and is always floating point.
pub fn expected_frequencies(table: impl IntoTable) -> StatsResult<Table> {
    table.into_table()?.expected_frequencies()
}
