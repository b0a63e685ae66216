use dyn_clone::DynClone;
use ndarray::prelude::*;

// Define a trait for the objective function
pub trait ObjFn: DynClone {
    fn call(&self, x: &[f64]) -> f64;

    fn call_scalar(&self, x: f64) -> f64 {
        self.call(&[x])
    }
}
dyn_clone::clone_trait_object!(ObjFn);

impl<F> ObjFn for F
where
    F: Fn(&[f64]) -> f64 + Clone,
{
    fn call(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

// Wrapper for single-dimensional functions
#[derive(Clone)]
pub struct SingleDimFn<F>(pub F)
where
    F: Fn(f64) -> f64 + Clone;

impl<F> SingleDimFn<F>
where
    F: Fn(f64) -> f64 + Clone,
{
    pub fn new(f: F) -> Self {
        SingleDimFn(f)
    }
}

impl<F> ObjFn for SingleDimFn<F>
where
    F: Fn(f64) -> f64 + Clone,
{
    fn call(&self, x: &[f64]) -> f64 {
        // Take the first element for single-dim functions
        (self.0)(x[0])
    }

    fn call_scalar(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}

/// Wrapper for multi-dimensional functions written against `ndarray` vectors
#[derive(Clone)]
pub struct MultiDimFn<F>(pub F)
where
    F: Fn(&Array1<f64>) -> f64 + Clone;

impl<F> MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    pub fn new(f: F) -> Self {
        MultiDimFn(f)
    }
}

impl<F> ObjFn for MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    fn call(&self, x: &[f64]) -> f64 {
        (self.0)(&Array1::from_vec(x.to_vec()))
    }
}
