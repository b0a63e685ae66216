use crate::{
    error::MinimizerError,
    minimize::{
        trace::{self, Progress},
        Minimizer, MinimizerResult, ObjFn, OutputFlags, Simplex, Snapshot,
    },
};
use ndarray::prelude::*;
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// How often each transformation was attempted during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub reflections: usize,
    pub expansions: usize,
    pub contractions: usize,
    pub shrinks: usize,
}

/// Result of one call to [`Simplex::optimize`]
#[derive(Debug, Clone)]
pub struct OptimizeReport {
    pub xmin: Array1<f64>,
    pub fmin: f64,
    pub best_index: usize,
    pub iters: usize,
    pub fn_evals: usize,
    pub stopping_criterion: f64,
    pub threshold: f64,
    pub converged: bool,
    pub steps: StepCounts,
}

impl MinimizerResult<Array1<f64>> for OptimizeReport {
    fn xmin(&self) -> Array1<f64> {
        self.xmin.clone()
    }

    fn fmin(&self) -> f64 {
        self.fmin
    }

    fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn converged(&self) -> bool {
        self.converged
    }
}

impl Minimizer<Array1<f64>> for Simplex {
    type Output = OptimizeReport;

    fn minimize(&mut self, max_iters: Option<usize>) -> Result<OptimizeReport, MinimizerError> {
        self.run(OutputFlags::new(), max_iters.or(self.max_iters), &mut io::sink())
    }
}

fn calc_obj(f: &dyn ObjFn, x: ArrayView1<f64>) -> Result<f64, MinimizerError> {
    let y = match x.as_slice() {
        Some(x) => f.call(x),
        None => f.call(&x.to_vec()),
    };
    // +inf is a valid penalty; NaN and -inf cannot be ranked
    if y.is_nan() || y == f64::NEG_INFINITY {
        return Err(MinimizerError::FunctionEvaluationError);
    }
    Ok(y)
}

/// Sum of squared deviations from the mean, infinite while any value is
fn spread(values: &Array1<f64>) -> f64 {
    if values.iter().any(|y| y.is_infinite()) {
        return f64::INFINITY;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|&y| (y - mean) * (y - mean)).sum()
}

impl Simplex {
    /// Run Nelder-Mead until the stopping criterion reaches the threshold,
    /// printing the trace (if requested) to stdout.
    ///
    /// The objective may return `f64::INFINITY` to penalize a region; the
    /// stopping criterion stays infinite until every vertex has left it. A NaN
    /// or `-inf` value aborts the run with
    /// [`MinimizerError::FunctionEvaluationError`].
    pub fn optimize(&mut self, flags: OutputFlags) -> Result<OptimizeReport, MinimizerError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run(flags, self.max_iters, &mut out)
    }

    /// Same as [`optimize`](Simplex::optimize), with the trace written to `out`
    pub fn optimize_to<W: Write>(
        &mut self,
        flags: OutputFlags,
        out: &mut W,
    ) -> Result<OptimizeReport, MinimizerError> {
        self.run(flags, self.max_iters, out)
    }

    fn calc_obj(&mut self, x: ArrayView1<f64>) -> Result<f64, MinimizerError> {
        self.fn_evals += 1;
        calc_obj(&*self.f, x)
    }

    fn replace(&mut self, i: usize, point: &Array1<f64>, value: f64) {
        self.points.row_mut(i).assign(point);
        self.values[i] = value;
    }

    /// Single pass over the values: returns (worst, best).
    ///
    /// A vertex that raises the running worst is not compared against the
    /// running best in the same step.
    fn worst_and_best(&self) -> (usize, usize) {
        let mut y_w = self.values[0];
        let mut y_b = self.values[0];
        let mut i_w = 0;
        let mut i_b = 0;
        for i in 1..=self.n {
            if self.values[i] > y_w {
                y_w = self.values[i];
                i_w = i;
            } else if self.values[i] < y_b {
                y_b = self.values[i];
                i_b = i;
            }
        }
        (i_w, i_b)
    }

    /// Mean of every vertex except `i_w`
    fn centroid(&self, i_w: usize) -> Array1<f64> {
        let mut centroid = Array1::<f64>::zeros(self.n);
        for i in 0..=self.n {
            if i != i_w {
                for j in 0..self.n {
                    centroid[j] += self.points[(i, j)];
                }
            }
        }
        centroid / self.n as f64
    }

    /// Evaluate every vertex and start a fresh history
    fn evaluate_all(&mut self) -> Result<usize, MinimizerError> {
        let mut values = Array1::zeros(self.n + 1);
        for i in 0..=self.n {
            self.fn_evals += 1;
            values[i] = calc_obj(&*self.f, self.points.row(i))?;
        }
        self.values = values;
        self.evaluated = true;
        self.stopping_criterion = f64::INFINITY;
        self.history.clear();
        self.history
            .push(Snapshot::new(&self.points, &self.values, f64::INFINITY));
        Ok(self.n + 1)
    }

    /// One Nelder-Mead update; returns the evaluations it used
    fn step(
        &mut self,
        iteration: usize,
        steps: &mut StepCounts,
    ) -> Result<usize, MinimizerError> {
        let n = self.n;
        let evals_before = self.fn_evals;
        let (i_w, i_b) = self.worst_and_best();
        let centroid = self.centroid(i_w);

        // Reflect
        let p_star = Array1::from_shape_fn(n, |j| {
            (1.0 + self.alpha) * centroid[j] - self.alpha * self.points[(i_w, j)]
        });
        let y_star = self.calc_obj(p_star.view())?;
        steps.reflections += 1;

        if y_star < self.values[i_b] {
            // Expand
            let p_2star = Array1::from_shape_fn(n, |j| {
                (1.0 - self.gamma) * centroid[j] - self.gamma * p_star[j]
            });
            let y_2star = self.calc_obj(p_2star.view())?;
            steps.expansions += 1;
            if y_2star < self.values[i_b] {
                trace!(iteration, worst = i_w, value = y_2star, "expansion accepted");
                self.replace(i_w, &p_2star, y_2star);
            } else {
                trace!(iteration, worst = i_w, value = y_star, "reflection accepted");
                self.replace(i_w, &p_star, y_star);
            }
        } else {
            let rank = (0..=n)
                .filter(|&i| i != i_w && y_star > self.values[i])
                .count();
            if rank == n {
                if y_star <= self.values[i_w] {
                    self.replace(i_w, &p_star, y_star);
                }
                // Contract
                let p_2star = Array1::from_shape_fn(n, |j| {
                    (1.0 - self.beta) * centroid[j] - self.beta * self.points[(i_w, j)]
                });
                let y_2star = self.calc_obj(p_2star.view())?;
                steps.contractions += 1;
                if y_2star > self.values[i_w] {
                    // Shrink toward the best vertex
                    trace!(iteration, best = i_b, "shrinking simplex");
                    steps.shrinks += 1;
                    for i in 0..=n {
                        if i == i_b {
                            continue;
                        }
                        let shrunk = Array1::from_shape_fn(n, |j| {
                            self.sigma * self.points[(i, j)]
                                + (1.0 - self.sigma) * self.points[(i_b, j)]
                        });
                        let y = self.calc_obj(shrunk.view())?;
                        self.replace(i, &shrunk, y);
                    }
                } else {
                    trace!(
                        iteration,
                        worst = i_w,
                        value = y_2star,
                        "contraction accepted"
                    );
                    self.replace(i_w, &p_2star, y_2star);
                }
            } else {
                trace!(iteration, worst = i_w, value = y_star, "reflection accepted");
                self.replace(i_w, &p_star, y_star);
            }
        }

        Ok(self.fn_evals - evals_before)
    }

    pub(crate) fn run<W: Write + ?Sized>(
        &mut self,
        flags: OutputFlags,
        max_iters: Option<usize>,
        out: &mut W,
    ) -> Result<OptimizeReport, MinimizerError> {
        let mut fn_evals = 0;
        let mut stopping_criterion = if self.evaluated {
            spread(&self.values)
        } else {
            fn_evals += self.evaluate_all()?;
            1.0 + self.tol
        };
        let threshold = self.threshold();
        let mut iters = 0;
        let mut steps = StepCounts::default();
        let mut capped = false;

        debug!(
            num_vars = self.n,
            threshold,
            flags = %flags,
            "nelder-mead run started"
        );
        trace::start(out, &flags, threshold)?;

        while stopping_criterion > threshold {
            if max_iters.is_some_and(|max| iters >= max) {
                capped = true;
                break;
            }
            iters += 1;
            self.iters += 1;
            fn_evals += self.step(iters, &mut steps)?;

            stopping_criterion = spread(&self.values);
            self.stopping_criterion = stopping_criterion;

            let (i_b, y_b) = self.best();
            trace::row(
                out,
                &flags,
                threshold,
                &Progress {
                    iteration: iters,
                    fn_evals,
                    fmin: y_b,
                    stopping_criterion,
                    best_point: self.points.row(i_b),
                },
            )?;

            if flags.record_history {
                self.history
                    .push(Snapshot::new(&self.points, &self.values, stopping_criterion));
            }
        }

        trace::finish(out, &flags)?;

        let (best_index, fmin) = self.best();
        let converged = stopping_criterion <= threshold;
        if capped {
            warn!(
                iters,
                stopping_criterion, threshold, "nelder-mead stopped at iteration cap"
            );
        }
        debug!(iters, fn_evals, fmin, converged, "nelder-mead run finished");

        Ok(OptimizeReport {
            xmin: self.points.row(best_index).to_owned(),
            fmin,
            best_index,
            iters,
            fn_evals,
            stopping_criterion,
            threshold,
            converged,
            steps,
        })
    }
}
