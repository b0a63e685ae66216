use crate::{
    error::MinimizerError,
    minimize::{History, ObjFn},
};
use faer::Mat;
use ndarray::prelude::*;
use std::fmt;

/// Default reflection coefficient
pub const REFLECTION: f64 = 1.0;
/// Default expansion coefficient
pub const EXPANSION: f64 = 2.0;
/// Default contraction coefficient
pub const CONTRACTION: f64 = 0.5;
/// Default shrink coefficient
pub const SHRINK: f64 = 0.5;

/// Nelder-Mead simplex: `n + 1` vertices in `n` variables, their objective
/// values and the coefficients driving the update rule.
///
/// Row `i` of [`points`](Simplex::points) is vertex `i` and
/// [`values`](Simplex::values)`[i]` is the objective evaluated there. The
/// values are zero until the first call to [`optimize`](Simplex::optimize).
///
/// ```
/// use ndarray::array;
/// use nmsimplex::minimize::{OutputFlags, Simplex};
///
/// let f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
/// let mut simplex = Simplex::new(2, array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], f, 1e-8).unwrap();
/// let report = simplex.optimize(OutputFlags::new()).unwrap();
/// assert!(report.converged);
/// assert!((report.xmin[0] - 1.0).abs() < 1e-3);
/// ```
#[derive(Clone)]
pub struct Simplex {
    pub(crate) n: usize,
    pub(crate) points: Array2<f64>,
    pub(crate) values: Array1<f64>,
    pub(crate) f: Box<dyn ObjFn>,
    pub(crate) tol: f64,
    pub(crate) alpha: f64, // Reflection coefficient
    pub(crate) gamma: f64, // Expansion coefficient
    pub(crate) beta: f64,  // Contraction coefficient
    pub(crate) sigma: f64, // Shrink coefficient
    pub(crate) max_iters: Option<usize>,
    pub(crate) evaluated: bool,
    pub(crate) iters: usize,
    pub(crate) fn_evals: usize,
    pub(crate) stopping_criterion: f64,
    pub(crate) history: History,
}

impl Simplex {
    /// Build a simplex from `num_vars + 1` rows of `num_vars` coordinates.
    ///
    /// The simplex must not be degenerate; this is not checked (see
    /// [`volume`](Simplex::volume)).
    pub fn new<F>(
        num_vars: usize,
        points: Array2<f64>,
        f: F,
        tolerance: f64,
    ) -> Result<Self, MinimizerError>
    where
        F: ObjFn + 'static,
    {
        Simplex::new_boxed(num_vars, points, Box::new(f), tolerance)
    }

    /// Build a simplex from row-major coordinates, `num_vars` per vertex
    pub fn from_flat<F>(
        num_vars: usize,
        points: &[f64],
        f: F,
        tolerance: f64,
    ) -> Result<Self, MinimizerError>
    where
        F: ObjFn + 'static,
    {
        if num_vars == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        let points = Array2::from_shape_vec((num_vars + 1, num_vars), points.to_vec())
            .map_err(|_| MinimizerError::InvalidInitialSimplex)?;
        Simplex::new_boxed(num_vars, points, Box::new(f), tolerance)
    }

    pub fn new_boxed(
        num_vars: usize,
        points: Array2<f64>,
        f: Box<dyn ObjFn>,
        tolerance: f64,
    ) -> Result<Self, MinimizerError> {
        if num_vars == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        if points.dim() != (num_vars + 1, num_vars) || points.iter().any(|x| !x.is_finite()) {
            return Err(MinimizerError::InvalidInitialSimplex);
        }
        check_tolerance(tolerance)?;

        Ok(Simplex {
            n: num_vars,
            points: points.as_standard_layout().into_owned(),
            values: Array1::zeros(num_vars + 1),
            f,
            tol: tolerance,
            alpha: REFLECTION,
            gamma: EXPANSION,
            beta: CONTRACTION,
            sigma: SHRINK,
            max_iters: None,
            evaluated: false,
            iters: 0,
            fn_evals: 0,
            stopping_criterion: f64::INFINITY,
            history: History::new(),
        })
    }

    pub fn num_vars(&self) -> usize {
        self.n
    }

    /// Current vertices, one row per vertex
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn point(&self, i: usize) -> ArrayView1<f64> {
        self.points.row(i)
    }

    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Index and value of the lowest vertex, first index wins on ties
    pub fn best(&self) -> (usize, f64) {
        let mut i_b = 0;
        let mut y_b = self.values[0];
        for i in 1..=self.n {
            if self.values[i] < y_b {
                y_b = self.values[i];
                i_b = i;
            }
        }
        (i_b, y_b)
    }

    /// Index and value of the highest vertex, first index wins on ties
    pub fn worst(&self) -> (usize, f64) {
        let mut i_w = 0;
        let mut y_w = self.values[0];
        for i in 1..=self.n {
            if self.values[i] > y_w {
                y_w = self.values[i];
                i_w = i;
            }
        }
        (i_w, y_w)
    }

    /// True once the values match the points
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    /// Convergence threshold on the stopping criterion, `tolerance² · n`
    pub fn threshold(&self) -> f64 {
        self.tol * self.tol * self.n as f64
    }

    /// Stopping criterion after the last iteration, infinite before any
    pub fn stopping_criterion(&self) -> f64 {
        self.stopping_criterion
    }

    /// Iterations over every run so far
    pub fn iterations(&self) -> usize {
        self.iters
    }

    /// Objective evaluations over every run so far
    pub fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reflection_coefficient(&self) -> f64 {
        self.alpha
    }

    pub fn expansion_coefficient(&self) -> f64 {
        self.gamma
    }

    pub fn contraction_coefficient(&self) -> f64 {
        self.beta
    }

    pub fn shrink_coefficient(&self) -> f64 {
        self.sigma
    }

    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iters
    }

    pub fn set_tolerance(&mut self, tol: f64) -> Result<(), MinimizerError> {
        check_tolerance(tol)?;
        self.tol = tol;
        Ok(())
    }

    pub fn set_reflection_coefficient(&mut self, alpha: f64) -> Result<(), MinimizerError> {
        self.alpha = check_coefficient("reflection", alpha)?;
        Ok(())
    }

    pub fn set_expansion_coefficient(&mut self, gamma: f64) -> Result<(), MinimizerError> {
        self.gamma = check_coefficient("expansion", gamma)?;
        Ok(())
    }

    pub fn set_contraction_coefficient(&mut self, beta: f64) -> Result<(), MinimizerError> {
        self.beta = check_coefficient("contraction", beta)?;
        Ok(())
    }

    pub fn set_shrink_coefficient(&mut self, sigma: f64) -> Result<(), MinimizerError> {
        self.sigma = check_coefficient("shrink", sigma)?;
        Ok(())
    }

    /// Cap on the iterations of a single run; `None` runs until converged
    pub fn set_max_iterations(&mut self, iters: Option<usize>) {
        self.max_iters = iters;
    }

    /// Volume of the simplex, `|det(P_1 - P_0, ..., P_n - P_0)| / n!`
    pub fn volume(&self) -> f64 {
        let edges = Mat::<f64>::from_fn(self.n, self.n, |i, j| {
            self.points[(j + 1, i)] - self.points[(0, i)]
        });
        let factorial: f64 = (1..=self.n).map(|k| k as f64).product();
        edges.determinant().abs() / factorial
    }

    /// True when the volume is at most `eps`
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.volume() <= eps
    }
}

impl fmt::Debug for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Simplex")
            .field("n", &self.n)
            .field("points", &self.points)
            .field("values", &self.values)
            .field("tol", &self.tol)
            .field("alpha", &self.alpha)
            .field("gamma", &self.gamma)
            .field("beta", &self.beta)
            .field("sigma", &self.sigma)
            .field("max_iters", &self.max_iters)
            .field("evaluated", &self.evaluated)
            .field("iters", &self.iters)
            .field("fn_evals", &self.fn_evals)
            .field("stopping_criterion", &self.stopping_criterion)
            .field("history_len", &self.history.len())
            .finish()
    }
}

fn check_tolerance(tol: f64) -> Result<(), MinimizerError> {
    if !(tol.is_finite() && tol > 0.0) {
        return Err(MinimizerError::InvalidTolerance);
    }
    Ok(())
}

fn check_coefficient(name: &str, val: f64) -> Result<f64, MinimizerError> {
    if !val.is_finite() {
        return Err(MinimizerError::InvalidParameters(format!(
            "{} coefficient must be finite, got {}",
            name, val
        )));
    }
    Ok(val)
}
