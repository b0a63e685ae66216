//! Float comparison helpers shared by the unit tests, integration tests and
//! benchmarks.
use float_cmp::{approx_eq, F64Margin};
use ndarray::prelude::*;

pub fn comp_f64(exemplar: &f64, calc: &f64, precision: F64Margin, test: &str, idx: &str) {
    assert!(
        approx_eq!(f64, *calc, *exemplar, precision),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}

pub fn comp_row_f64(exemplar: &Array1<f64>, calc: &Array1<f64>, precision: F64Margin, test: &str) {
    assert_eq!(exemplar.len(), calc.len(), "test {} length mismatch", test);
    for k in 0..calc.len() {
        comp_f64(
            &exemplar[k],
            &calc[k],
            precision,
            test,
            format!("({})", k).as_str(),
        );
    }
}

pub fn comp_mat_f64(exemplar: &Array2<f64>, calc: &Array2<f64>, precision: F64Margin, test: &str) {
    assert_eq!(exemplar.dim(), calc.dim(), "test {} shape mismatch", test);
    for j in 0..calc.nrows() {
        for k in 0..calc.ncols() {
            comp_f64(
                &exemplar[(j, k)],
                &calc[(j, k)],
                precision,
                test,
                format!("({}, {})", j, k).as_str(),
            );
        }
    }
}

#[cfg(test)]
mod util_tests {
    use super::*;

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-9,
        ulps: 4,
    };

    #[test]
    fn close_values_pass() {
        comp_f64(&1.0, &(1.0 + 1e-12), MARGIN, "close", "");
        comp_row_f64(&array![0.1 + 0.2, 1.0], &array![0.3, 1.0], MARGIN, "row");
        comp_mat_f64(&array![[1.0, 2.0]], &array![[1.0, 2.0 + 1e-13]], MARGIN, "mat");
    }

    #[test]
    #[should_panic(expected = "Failed test far")]
    fn distant_values_fail() {
        comp_f64(&1.0, &1.1, MARGIN, "far", "");
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn shape_mismatch_fails() {
        comp_mat_f64(&array![[1.0, 2.0]], &array![[1.0], [2.0]], MARGIN, "shape");
    }
}
