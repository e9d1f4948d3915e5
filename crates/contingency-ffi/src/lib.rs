//! C FFI boundary for the contingency test engines
//!
//! This crate provides C-compatible functions for calling the engines from a
//! C or C++ host.

mod types;

pub use types::*;

use contingency_core::{
    chisq_goodness_of_fit, expected_frequencies, ChiSquareContingency, ChiSquareOptions, CochranQ,
    McNemarOptions, McNemarTest, StatsError,
};
use libc::c_char;
use std::slice;

/// Helper to allocate and copy a string
unsafe fn alloc_string(s: &str) -> *mut c_char {
    let len = s.len() + 1;
    let ptr = libc::malloc(len) as *mut c_char;
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(s.as_ptr(), ptr as *mut u8, s.len());
        *ptr.add(s.len()) = 0;
    }
    ptr
}

/// Run `f`, converting both a panic and a `StatsError` into `out_error`.
unsafe fn guarded<T>(
    name: &str,
    out_error: *mut ContingencyError,
    f: impl FnOnce() -> Result<T, StatsError>,
) -> Option<T> {
    let result = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(r) => r,
        Err(_) => {
            log::error!("panic inside {}", name);
            if !out_error.is_null() {
                (*out_error).set(
                    ErrorCode::InternalError,
                    &format!("Internal panic in {}", name),
                );
            }
            return None;
        }
    };

    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if !out_error.is_null() {
                (*out_error).set_stats(&e);
            }
            None
        }
    }
}

/// Reset `out_error` and check the output pointer.
unsafe fn begin<T>(out_result: *mut T, out_error: *mut ContingencyError) -> bool {
    if !out_error.is_null() {
        *out_error = ContingencyError::success();
    }

    if out_result.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_result is NULL");
        }
        return false;
    }
    true
}

unsafe fn null_table_error(out_error: *mut ContingencyError, name: &str) -> bool {
    if !out_error.is_null() {
        (*out_error).set(
            ErrorCode::InvalidInput,
            &format!("{} has a NULL data or shape pointer", name),
        );
    }
    false
}

/// Get library version string
#[no_mangle]
pub extern "C" fn contingency_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Expected frequencies of a 1-D or 2-D table under independence
///
/// On success `*out_values` holds `*out_rows * *out_cols` row-major values
/// allocated with malloc; release them with `contingency_free_values`.
///
/// # Safety
/// - `table` must describe valid data and shape buffers
/// - `out_values`, `out_rows` and `out_cols` must be valid pointers
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn contingency_expected_frequencies(
    table: TableArray,
    out_values: *mut *mut f64,
    out_rows: *mut usize,
    out_cols: *mut usize,
    out_error: *mut ContingencyError,
) -> bool {
    if !begin(out_values, out_error) {
        return false;
    }
    if out_rows.is_null() || out_cols.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "out_rows or out_cols is NULL");
        }
        return false;
    }

    let Some(shaped) = table.as_shaped() else {
        return null_table_error(out_error, "table");
    };

    let Some(expected) = guarded("expected frequencies", out_error, || {
        expected_frequencies(shaped)
    }) else {
        return false;
    };

    let values = expected.to_vec();
    let ptr = libc::malloc(values.len() * std::mem::size_of::<f64>()) as *mut f64;
    if ptr.is_null() {
        if !out_error.is_null() {
            (*out_error).set(
                ErrorCode::AllocationFailure,
                "Failed to allocate expected frequencies",
            );
        }
        return false;
    }
    std::ptr::copy_nonoverlapping(values.as_ptr(), ptr, values.len());

    *out_values = ptr;
    *out_rows = expected.nrows();
    *out_cols = expected.ncols();
    true
}

/// Free values allocated by `contingency_expected_frequencies`
///
/// # Safety
/// `values` must be NULL or a pointer returned through `out_values`
#[no_mangle]
pub unsafe extern "C" fn contingency_free_values(values: *mut f64) {
    if !values.is_null() {
        libc::free(values as *mut libc::c_void);
    }
}

/// Chi-square test of independence
///
/// # Safety
/// - `observed` must describe valid data and shape buffers
/// - `expected` must be NULL or point to a valid TableArray
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn contingency_chisq_test(
    observed: TableArray,
    expected: *const TableArray,
    continuity: bool,
    out_result: *mut ChiSquareContingencyFFI,
    out_error: *mut ContingencyError,
) -> bool {
    if !begin(out_result, out_error) {
        return false;
    }

    let Some(observed) = observed.as_shaped() else {
        return null_table_error(out_error, "observed");
    };
    let expected = if expected.is_null() {
        None
    } else {
        match (*expected).as_shaped() {
            Some(shaped) => Some(shaped),
            None => return null_table_error(out_error, "expected"),
        }
    };

    let opts = ChiSquareOptions { continuity };
    let Some(test) = guarded("chi-square", out_error, || match expected {
        Some(expected) => ChiSquareContingency::with_expected(observed, expected, &opts),
        None => ChiSquareContingency::new(observed, &opts),
    }) else {
        return false;
    };

    let assoc = test.association_measures();
    *out_result = ChiSquareContingencyFFI {
        chi_square: test.chi_square(),
        p_value: test.p_value(),
        degrees_freedom: test.degrees_freedom(),
        continuity: test.continuity(),
        yates_applied: test.yates_applied(),
        n: test.n(),
        association: AssociationMeasuresFFI {
            contingency_coefficient: assoc.contingency_coefficient,
            cramers_v: assoc.cramers_v,
            phi_coefficient: assoc.phi_coefficient,
        },
        method: alloc_string(if test.yates_applied() {
            "Chi-square test for independence with Yates' continuity correction"
        } else {
            "Chi-square test for independence"
        }),
    };
    true
}

/// McNemar's test (2x2 tables only)
///
/// # Safety
/// - `table` must describe valid data and shape buffers
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn contingency_mcnemar_test(
    table: TableArray,
    continuity: bool,
    out_result: *mut McNemarResultFFI,
    out_error: *mut ContingencyError,
) -> bool {
    if !begin(out_result, out_error) {
        return false;
    }

    let Some(shaped) = table.as_shaped() else {
        return null_table_error(out_error, "table");
    };

    let opts = McNemarOptions { continuity };
    let Some(test) = guarded("McNemar", out_error, || McNemarTest::new(shaped, &opts)) else {
        return false;
    };

    *out_result = McNemarResultFFI {
        x2_statistic: test.mcnemar_x2_statistic(),
        z_statistic: test.z_asymptotic_statistic(),
        p_value: test.mcnemar_p_value(),
        exact_p_value: test.exact_p_value(),
        mid_p_value: test.mid_p_value(),
        n: test.n(),
        continuity: test.continuity(),
        method: alloc_string("McNemar's test"),
    };
    true
}

/// Cochran's Q test
///
/// # Safety
/// - `vectors` must point to `vector_count` valid DataArray structs
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn contingency_cochran_q(
    vectors: *const DataArray,
    vector_count: usize,
    out_result: *mut CochranQResultFFI,
    out_error: *mut ContingencyError,
) -> bool {
    if !begin(out_result, out_error) {
        return false;
    }

    if vectors.is_null() && vector_count > 0 {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidInput, "vectors is NULL");
        }
        return false;
    }

    let arrays: &[DataArray] = if vector_count == 0 {
        &[]
    } else {
        slice::from_raw_parts(vectors, vector_count)
    };
    let rows: Vec<Vec<f64>> = arrays.iter().map(|a| a.as_slice().to_vec()).collect();

    let Some(test) = guarded("Cochran's Q", out_error, || CochranQ::new(&rows)) else {
        return false;
    };

    *out_result = CochranQResultFFI {
        q_statistic: test.q_statistic(),
        p_value: test.p_value(),
        degrees_freedom: test.degrees_freedom(),
        subjects: test.subjects(),
        method: alloc_string("Cochran's Q test"),
    };
    true
}

/// Chi-square goodness-of-fit test
///
/// # Safety
/// - `observed` must be a valid DataArray
/// - `expected` must be NULL (uniform) or point to a valid DataArray
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn contingency_goodness_of_fit(
    observed: DataArray,
    expected: *const DataArray,
    out_result: *mut ChiSquareResultFFI,
    out_error: *mut ContingencyError,
) -> bool {
    if !begin(out_result, out_error) {
        return false;
    }

    let observed = observed.as_slice();
    let expected = if expected.is_null() {
        None
    } else {
        Some((*expected).as_slice())
    };

    let Some(r) = guarded("goodness-of-fit", out_error, || {
        chisq_goodness_of_fit(observed, expected)
    }) else {
        return false;
    };

    *out_result = ChiSquareResultFFI {
        statistic: r.statistic,
        p_value: r.p_value,
        df: r.df,
        method: alloc_string(&r.method),
    };
    true
}

/// Free memory allocated by `contingency_chisq_test`
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a ChiSquareContingencyFFI
#[no_mangle]
pub unsafe extern "C" fn contingency_free_chisq_contingency(result: *mut ChiSquareContingencyFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}

/// Free memory allocated by `contingency_mcnemar_test`
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a McNemarResultFFI
#[no_mangle]
pub unsafe extern "C" fn contingency_free_mcnemar_result(result: *mut McNemarResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}

/// Free memory allocated by `contingency_cochran_q`
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a CochranQResultFFI
#[no_mangle]
pub unsafe extern "C" fn contingency_free_cochran_result(result: *mut CochranQResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}

/// Free memory allocated by `contingency_goodness_of_fit`
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a ChiSquareResultFFI
#[no_mangle]
pub unsafe extern "C" fn contingency_free_chisq_result(result: *mut ChiSquareResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}
