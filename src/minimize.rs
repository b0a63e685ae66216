use crate::error::MinimizerError;

pub mod history;
pub mod nelder_mead;
pub mod objective;
pub mod options;
pub mod simplex;
mod trace;

pub use self::history::{History, Snapshot};
pub use self::nelder_mead::{OptimizeReport, StepCounts};
pub use self::objective::{MultiDimFn, ObjFn, SingleDimFn};
pub use self::options::OutputFlags;
pub use self::simplex::Simplex;

pub trait Minimizer<T> {
    type Output: MinimizerResult<T>;

    /// Run the optimization, stopping after `max_iters` iterations if given
    fn minimize(&mut self, max_iters: Option<usize>) -> Result<Self::Output, MinimizerError>;
}

pub trait MinimizerResult<T> {
    fn xmin(&self) -> T;
    fn fmin(&self) -> f64;
    fn fn_evals(&self) -> usize;
    fn iters(&self) -> usize;
    fn converged(&self) -> bool;
}
