//! Derivative-free minimization with the Nelder-Mead simplex method.
//!
//! A [`Simplex`](minimize::Simplex) holds `n + 1` vertices in `n` variables.
//! [`optimize`](minimize::Simplex::optimize) reflects, expands, contracts and
//! shrinks it until the spread of the objective values drops below
//! `tolerance² · n`, optionally keeping a snapshot of every iteration.
//!
//! ```
//! use ndarray::array;
//! use nmsimplex::prelude::*;
//!
//! let f = |x: &[f64]| 0.006 * (x[0] - 1.0).powi(2) + 0.009 * (x[1] - 2.0).powi(2)
//!     + 0.005 * x[0] * x[1] - 10.0;
//! let points = array![[-30.0, 30.0], [-20.0, 20.0], [-10.0, 30.0]];
//! let mut simplex = Simplex::new(2, points, f, 1e-10).unwrap();
//! let report = simplex
//!     .optimize(OutputFlags::new().with_record_history(true))
//!     .unwrap();
//!
//! assert!(report.converged);
//! assert_eq!(simplex.history().len(), report.iters + 1);
//! ```
pub mod error;
pub mod minimize;
pub mod prelude;
pub mod util;
