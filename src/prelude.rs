//! nmsimplex prelude.
//!
//! This module contains the most used types and traits, which you can import
//! easily as a group.
//!
//! ```
//! use nmsimplex::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::MinimizerError;

#[doc(no_inline)]
pub use crate::minimize::{
    History, Minimizer, MinimizerResult, MultiDimFn, ObjFn, OptimizeReport, OutputFlags,
    Simplex, SingleDimFn, Snapshot, StepCounts,
};
