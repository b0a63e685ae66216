// File: benches/nelder_mead_benchmarks.rs

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::prelude::*;
use nmsimplex::prelude::*;
use std::hint::black_box;
use std::time::Duration;

#[derive(Clone)]
struct TestProblem {
    name: &'static str,
    function: fn(&[f64]) -> f64,
    x0: Array1<f64>,
    step: f64,
    tolerance: f64,
    dimensions: usize,
}

impl TestProblem {
    /// Start vertex plus one vertex offset by `step` along each axis
    fn initial_simplex(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.dimensions + 1, self.dimensions), |(i, j)| {
            if i == j + 1 {
                self.x0[j] + self.step
            } else {
                self.x0[j]
            }
        })
    }

    fn simplex(&self) -> Simplex {
        Simplex::new(
            self.dimensions,
            self.initial_simplex(),
            self.function,
            self.tolerance,
        )
        .expect("benchmark problems are well formed")
    }
}

// Test Functions
fn treasure_seeking(x: &[f64]) -> f64 {
    0.006 * (x[0] - 1.0) * (x[0] - 1.0) + 0.009 * (x[1] - 2.0) * (x[1] - 2.0)
        + 0.005 * x[0] * x[1]
        - 10.0
}

fn sphere_function(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

fn rosenbrock_function(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        let term1 = 100.0 * (x[i + 1] - x[i] * x[i]) * (x[i + 1] - x[i] * x[i]);
        let term2 = (1.0 - x[i]) * (1.0 - x[i]);
        sum += term1 + term2;
    }
    sum
}

fn himmelblau_function(x: &[f64]) -> f64 {
    let term1 = (x[0] * x[0] + x[1] - 11.0) * (x[0] * x[0] + x[1] - 11.0);
    let term2 = (x[0] + x[1] * x[1] - 7.0) * (x[0] + x[1] * x[1] - 7.0);
    term1 + term2
}

fn setup_test_problems() -> Vec<TestProblem> {
    vec![
        TestProblem {
            name: "treasure_2d",
            function: treasure_seeking,
            x0: array![-30.0, 30.0],
            step: 10.0,
            tolerance: 1e-10,
            dimensions: 2,
        },
        TestProblem {
            name: "sphere_2d",
            function: sphere_function,
            x0: array![1.5, 1.5],
            step: 1.0,
            tolerance: 1e-8,
            dimensions: 2,
        },
        TestProblem {
            name: "rosenbrock_2d",
            function: rosenbrock_function,
            x0: array![-1.2, 1.0],
            step: 0.1,
            tolerance: 1e-8,
            dimensions: 2,
        },
        TestProblem {
            name: "himmelblau_2d",
            function: himmelblau_function,
            x0: array![0.0, 0.0],
            step: 1.0,
            tolerance: 1e-8,
            dimensions: 2,
        },
        TestProblem {
            name: "sphere_3d",
            function: sphere_function,
            x0: Array1::from_elem(3, 0.5),
            step: 1.0,
            tolerance: 1e-8,
            dimensions: 3,
        },
        TestProblem {
            name: "sphere_5d",
            function: sphere_function,
            x0: Array1::from_elem(5, 0.5),
            step: 1.0,
            tolerance: 1e-6,
            dimensions: 5,
        },
    ]
}

fn run_optimization_benchmark(
    problem: &TestProblem,
    flags: OutputFlags,
    iterations: Option<usize>,
) -> (f64, usize, usize, bool) {
    let mut simplex = problem.simplex();
    simplex.set_max_iterations(iterations);
    let report = simplex
        .optimize_to(flags, &mut std::io::sink())
        .expect("benchmark objectives stay finite");
    (report.fmin, report.iters, report.fn_evals, report.converged)
}

fn bench_iteration_caps(c: &mut Criterion) {
    let problems = setup_test_problems();

    for cap in [1, 10, 100] {
        let mut group = c.benchmark_group(format!("nelder_mead_{}_iterations", cap));
        group.measurement_time(Duration::from_secs(10));
        group.sample_size(20);

        for problem in &problems {
            group.throughput(Throughput::Elements(problem.dimensions as u64));
            group.bench_with_input(
                BenchmarkId::new("optimize", problem.name),
                problem,
                |b, prob| {
                    b.iter(|| {
                        black_box(run_optimization_benchmark(
                            black_box(prob),
                            OutputFlags::new(),
                            black_box(Some(cap)),
                        ))
                    });
                },
            );
        }
        group.finish();
    }
}

fn bench_convergence(c: &mut Criterion) {
    let problems = setup_test_problems();

    let mut group = c.benchmark_group("nelder_mead_convergence");
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(20);

    for problem in &problems {
        for (label, flags) in [
            ("plain", OutputFlags::new()),
            ("history", OutputFlags::new().with_record_history(true)),
        ] {
            group.throughput(Throughput::Elements(problem.dimensions as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("optimize_{}", label), problem.name),
                problem,
                |b, prob| {
                    b.iter(|| {
                        black_box(run_optimization_benchmark(
                            black_box(prob),
                            flags,
                            Some(100_000),
                        ))
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_iteration_caps, bench_convergence);
criterion_main!(benches);
