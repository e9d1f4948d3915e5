//! C-compatible types for FFI boundary

use contingency_core::{ShapedArray, StatsError};
use libc::c_char;

/// Error codes for FFI boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    InvalidInput = 1,
    InsufficientData = 2,
    DimensionMismatch = 3,
    InvalidValue = 4,
    DistributionError = 5,
    AllocationFailure = 6,
    InternalError = 99,
}

impl From<&StatsError> for ErrorCode {
    fn from(err: &StatsError) -> Self {
        match err {
            StatsError::InvalidInput(_) | StatsError::EmptyInput { .. } => ErrorCode::InvalidInput,
            StatsError::InsufficientDataMsg(_) => ErrorCode::InsufficientData,
            StatsError::TooManyDimensions { .. }
            | StatsError::ShapeMismatch { .. }
            | StatsError::DimensionMismatchMsg(_) => ErrorCode::DimensionMismatch,
            StatsError::InvalidValue { .. } => ErrorCode::InvalidValue,
            StatsError::Distribution(_) => ErrorCode::DistributionError,
        }
    }
}

/// Error information for FFI
#[repr(C)]
pub struct ContingencyError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl ContingencyError {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    pub fn set(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0;
    }

    pub fn set_stats(&mut self, err: &StatsError) {
        self.set(err.into(), &err.to_string());
    }
}

/// Flat array of f64 values
#[repr(C)]
pub struct DataArray {
    /// Pointer to data values
    pub data: *const f64,
    /// Number of elements
    pub len: usize,
}

impl DataArray {
    /// Borrow the values as a slice
    ///
    /// # Safety
    /// `data` must point to `len` valid f64 values (or `len` must be 0)
    pub unsafe fn as_slice<'a>(&self) -> &'a [f64] {
        if self.data.is_null() || self.len == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.data, self.len)
    }
}

/// Row-major n-dimensional array: `data` holds the product of `shape` values
#[repr(C)]
pub struct TableArray {
    /// Pointer to row-major data values
    pub data: *const f64,
    /// Pointer to `ndim` axis lengths
    pub shape: *const usize,
    /// Number of axes
    pub ndim: usize,
}

impl TableArray {
    /// Borrow as a [`ShapedArray`]. Returns `None` if a pointer is NULL.
    ///
    /// # Safety
    /// `shape` must point to `ndim` values and `data` to as many values as
    /// their product.
    pub unsafe fn as_shaped<'a>(&self) -> Option<ShapedArray<'a>> {
        if self.shape.is_null() && self.ndim > 0 {
            return None;
        }
        let shape: &[usize] = if self.ndim == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(self.shape, self.ndim)
        };

        let len = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))?;
        let data: &[f64] = if len == 0 {
            &[]
        } else if self.data.is_null() {
            return None;
        } else {
            std::slice::from_raw_parts(self.data, len)
        };

        Some(ShapedArray::new(shape, data))
    }
}

/// Association measures for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AssociationMeasuresFFI {
    /// Pearson's contingency coefficient
    pub contingency_coefficient: f64,
    /// Cramer's V
    pub cramers_v: f64,
    /// phi coefficient (signed for 2x2 tables)
    pub phi_coefficient: f64,
}

/// Chi-square contingency result for FFI
#[repr(C)]
pub struct ChiSquareContingencyFFI {
    /// Chi-square statistic
    pub chi_square: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub degrees_freedom: usize,
    /// Whether continuity was requested
    pub continuity: bool,
    /// Whether Yates' correction entered the statistic
    pub yates_applied: bool,
    /// Grand total of the observed table
    pub n: f64,
    /// Association measures
    pub association: AssociationMeasuresFFI,
    /// Method name (must be freed)
    pub method: *mut c_char,
}

impl Default for ChiSquareContingencyFFI {
    fn default() -> Self {
        Self {
            chi_square: f64::NAN,
            p_value: f64::NAN,
            degrees_freedom: 0,
            continuity: false,
            yates_applied: false,
            n: f64::NAN,
            association: AssociationMeasuresFFI {
                contingency_coefficient: f64::NAN,
                cramers_v: f64::NAN,
                phi_coefficient: f64::NAN,
            },
            method: std::ptr::null_mut(),
        }
    }
}

/// McNemar result for FFI
#[repr(C)]
pub struct McNemarResultFFI {
    /// Asymptotic chi-square statistic
    pub x2_statistic: f64,
    /// Signed square root of the statistic
    pub z_statistic: f64,
    /// Asymptotic p-value
    pub p_value: f64,
    /// Exact binomial p-value
    pub exact_p_value: f64,
    /// Mid-p value
    pub mid_p_value: f64,
    /// Grand total of the table
    pub n: u64,
    /// Whether continuity correction was used
    pub continuity: bool,
    /// Method name (must be freed)
    pub method: *mut c_char,
}

impl Default for McNemarResultFFI {
    fn default() -> Self {
        Self {
            x2_statistic: f64::NAN,
            z_statistic: f64::NAN,
            p_value: f64::NAN,
            exact_p_value: f64::NAN,
            mid_p_value: f64::NAN,
            n: 0,
            continuity: false,
            method: std::ptr::null_mut(),
        }
    }
}

/// Cochran's Q result for FFI
#[repr(C)]
pub struct CochranQResultFFI {
    /// Q statistic
    pub q_statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom (treatments - 1)
    pub degrees_freedom: usize,
    /// Number of subjects
    pub subjects: usize,
    /// Method name (must be freed)
    pub method: *mut c_char,
}

impl Default for CochranQResultFFI {
    fn default() -> Self {
        Self {
            q_statistic: f64::NAN,
            p_value: f64::NAN,
            degrees_freedom: 0,
            subjects: 0,
            method: std::ptr::null_mut(),
        }
    }
}

/// Chi-square test result for FFI
#[repr(C)]
pub struct ChiSquareResultFFI {
    /// Chi-square statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Method name (must be freed)
    pub method: *mut c_char,
}

impl Default for ChiSquareResultFFI {
    fn default() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: 0,
            method: std::ptr::null_mut(),
        }
    }
}
