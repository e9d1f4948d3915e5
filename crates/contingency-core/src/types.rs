//! Canonical table representation and input normalisation
//!
//! Every engine converts its input through [`IntoTable`] exactly once, at the
//! constructor boundary, and validates the resulting [`Table`] afterwards.

use crate::errors::{StatsError, StatsResult};
use faer::Mat;

/// A rectangular table of non-negative, finite counts.
///
/// Backed by a dense `faer` matrix. One-dimensional input is stored as a
/// single-row table.
#[derive(Debug, Clone)]
pub struct Table {
    values: Mat<f64>,
}

impl Table {
    /// Build a table from row slices. All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> StatsResult<Self> {
        if rows.is_empty() {
            return Err(StatsError::EmptyInput { field: "table" });
        }

        let n_cols = rows[0].as_ref().len();
        for (i, row) in rows.iter().enumerate() {
            if row.as_ref().len() != n_cols {
                return Err(StatsError::DimensionMismatchMsg(format!(
                    "Row {} has {} columns, expected {}",
                    i,
                    row.as_ref().len(),
                    n_cols
                )));
            }
        }

        let values = Mat::from_fn(rows.len(), n_cols, |i, j| rows[i].as_ref()[j]);
        Self::from_mat(values)
    }

    /// Build a single-row table from a vector of counts.
    pub fn from_row(values: &[f64]) -> StatsResult<Self> {
        Self::from_rows(&[values])
    }

    /// Build a table from a flat row-major buffer and its shape.
    ///
    /// A shape of length 1 is a single-row table; any other length except 2
    /// is rejected.
    pub fn from_shape(shape: &[usize], data: &[f64]) -> StatsResult<Self> {
        let (n_rows, n_cols) = match *shape {
            [len] => (1, len),
            [rows, cols] => (rows, cols),
            _ => return Err(StatsError::TooManyDimensions { ndim: shape.len() }),
        };

        let expected_len = n_rows.checked_mul(n_cols).ok_or_else(|| {
            StatsError::InvalidInput(format!("Shape {:?} overflows", shape))
        })?;
        if data.len() != expected_len {
            return Err(StatsError::DimensionMismatchMsg(format!(
                "Shape {:?} needs {} values, got {}",
                shape,
                expected_len,
                data.len()
            )));
        }

        Self::from_mat(Mat::from_fn(n_rows, n_cols, |i, j| data[i * n_cols + j]))
    }

    /// Wrap an existing matrix after validating its entries.
    pub fn from_mat(values: Mat<f64>) -> StatsResult<Self> {
        if values.nrows() == 0 || values.ncols() == 0 {
            return Err(StatsError::EmptyInput { field: "table" });
        }

        for j in 0..values.ncols() {
            for i in 0..values.nrows() {
                let value = values[(i, j)];
                if !value.is_finite() {
                    return Err(StatsError::InvalidValue {
                        field: "table",
                        value,
                        reason: "entries must be finite",
                    });
                }
                if value < 0.0 {
                    return Err(StatsError::InvalidValue {
                        field: "table",
                        value,
                        reason: "entries must be non-negative",
                    });
                }
            }
        }

        log::trace!("normalised {}x{} table", values.nrows(), values.ncols());
        Ok(Self { values })
    }

    /// Internal constructor for tables derived from an already validated one.
    pub(crate) fn from_fn(
        n_rows: usize,
        n_cols: usize,
        f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        Self {
            values: Mat::from_fn(n_rows, n_cols, f),
        }
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Cell value at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.ncols()).map(|j| self.get(i, j)).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    /// Row-major copy of every cell.
    pub fn to_vec(&self) -> Vec<f64> {
        self.to_rows().into_iter().flatten().collect()
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Table {
        Table::from_fn(self.ncols(), self.nrows(), |i, j| self.get(j, i))
    }

    /// Whether every cell holds a whole number.
    pub fn is_integral(&self) -> bool {
        self.to_vec().iter().all(|v| v.fract() == 0.0)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_vec() == other.to_vec()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_rows())
    }
}

/// Borrowed n-dimensional buffer: row-major values plus a shape.
///
/// This is how array-like input with an arbitrary number of axes reaches the
/// engines; only 1-D and 2-D shapes convert into a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct ShapedArray<'a> {
    pub shape: &'a [usize],
    pub data: &'a [f64],
}

impl<'a> ShapedArray<'a> {
    pub fn new(shape: &'a [usize], data: &'a [f64]) -> Self {
        Self { shape, data }
    }
}

/// Conversion of table-like input into the canonical [`Table`].
pub trait IntoTable {
    fn into_table(self) -> StatsResult<Table>;
}

impl IntoTable for Table {
    fn into_table(self) -> StatsResult<Table> {
        Ok(self)
    }
}

impl IntoTable for &Table {
    fn into_table(self) -> StatsResult<Table> {
        Ok(self.clone())
    }
}

impl IntoTable for Mat<f64> {
    fn into_table(self) -> StatsResult<Table> {
        Table::from_mat(self)
    }
}

impl IntoTable for &Mat<f64> {
    fn into_table(self) -> StatsResult<Table> {
        Table::from_mat(self.clone())
    }
}

impl IntoTable for ShapedArray<'_> {
    fn into_table(self) -> StatsResult<Table> {
        Table::from_shape(self.shape, self.data)
    }
}

macro_rules! impl_into_table {
    ($($t:ty),* $(,)?) => {$(
        impl IntoTable for &[Vec<$t>] {
            fn into_table(self) -> StatsResult<Table> {
                let rows: Vec<Vec<f64>> = self
                    .iter()
                    .map(|row| row.iter().map(|&v| v as f64).collect())
                    .collect();
                Table::from_rows(&rows)
            }
        }

        impl IntoTable for &Vec<Vec<$t>> {
            fn into_table(self) -> StatsResult<Table> {
                self.as_slice().into_table()
            }
        }

        impl IntoTable for Vec<Vec<$t>> {
            fn into_table(self) -> StatsResult<Table> {
                self.as_slice().into_table()
            }
        }

        impl<const R: usize, const C: usize> IntoTable for &[[$t; C]; R] {
            fn into_table(self) -> StatsResult<Table> {
                let rows: Vec<Vec<f64>> = self
                    .iter()
                    .map(|row| row.iter().map(|&v| v as f64).collect())
                    .collect();
                Table::from_rows(&rows)
            }
        }

        impl<const R: usize, const C: usize> IntoTable for [[$t; C]; R] {
            fn into_table(self) -> StatsResult<Table> {
                (&self).into_table()
            }
        }

        impl IntoTable for &[$t] {
            fn into_table(self) -> StatsResult<Table> {
                let row: Vec<f64> = self.iter().map(|&v| v as f64).collect();
                Table::from_row(&row)
            }
        }

        impl IntoTable for Vec<$t> {
            fn into_table(self) -> StatsResult<Table> {
                self.as_slice().into_table()
            }
        }

        impl<const C: usize> IntoTable for [$t; C] {
            fn into_table(self) -> StatsResult<Table> {
                self.as_slice().into_table()
            }
        }
    )*};
}

impl_into_table!(f64, f32, usize, u64, u32, i64, i32);
