//! Derivative-free local minimization.
//!
//! Each objective evaluation of the transmon fit re-solves the level
//! spectrum, so the optimizer is gradient free and keeps the evaluation count
//! small.

use tracing::trace;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each iteration.
    pub history: Vec<f64>,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// A local minimizer over unconstrained real parameters.
pub trait Minimizer {
    /// Minimize `objective` starting from `initial_params`.
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64;
}

/// Nelder–Mead downhill simplex.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance on the simplex cost spread; the simplex
    /// diameter must also fall below `tol` relative to the best point.
    pub tol: f64,
    /// Initial simplex step, relative to each coordinate of the start point.
    pub initial_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-4,
            initial_step: 0.05,
        }
    }
}

impl NelderMead {
    /// Create a new Nelder–Mead optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the relative size of the initial simplex.
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    fn converged(&self, simplex: &[Vec<f64>], costs: &[f64]) -> bool {
        let spread = costs[costs.len() - 1] - costs[0];
        if spread.is_nan() || spread.abs() > self.tol {
            return false;
        }
        let best = &simplex[0];
        let scale = 1.0 + best.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let diameter = simplex[1..]
            .iter()
            .flat_map(|v| v.iter().zip(best).map(|(a, b)| (a - b).abs()))
            .fold(0.0_f64, f64::max);
        diameter <= self.tol * scale
    }
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, costs: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..costs.len()).collect();
    order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *costs = order.iter().map(|&i| costs[i]).collect();
}

/// `a + t·(b − a)`
fn lerp(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + t * (y - x)).collect()
}

impl Minimizer for NelderMead {
    fn minimize<F>(&self, mut objective: F, initial_params: Vec<f64>) -> OptimizationResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial_params.len();
        let mut num_evaluations = 0;
        let mut eval = |x: &[f64]| {
            num_evaluations += 1;
            objective(x)
        };

        let mut simplex = vec![initial_params.clone()];
        let mut costs = vec![eval(&initial_params)];
        for i in 0..n {
            let mut vertex = initial_params.clone();
            vertex[i] = if vertex[i].abs() < 1e-10 {
                0.00025
            } else {
                vertex[i] * (1.0 + self.initial_step)
            };
            costs.push(eval(&vertex));
            simplex.push(vertex);
        }
        sort_simplex(&mut simplex, &mut costs);

        let mut history = vec![costs[0]];
        let mut converged = false;
        let mut num_iterations = 0;

        while num_iterations < self.maxiter {
            if n == 0 || self.converged(&simplex, &costs) {
                converged = true;
                break;
            }
            num_iterations += 1;

            let mut centroid = vec![0.0; n];
            for vertex in &simplex[..n] {
                for (c, v) in centroid.iter_mut().zip(vertex) {
                    *c += v / n as f64;
                }
            }

            let worst = simplex[n].clone();
            let f_best = costs[0];
            let f_second = costs[n - 1];
            let f_worst = costs[n];

            let reflected = lerp(&centroid, &worst, -1.0);
            let f_reflected = eval(&reflected);

            if f_reflected < f_best {
                let expanded = lerp(&centroid, &worst, -2.0);
                let f_expanded = eval(&expanded);
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    costs[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    costs[n] = f_reflected;
                }
            } else if f_reflected < f_second {
                simplex[n] = reflected;
                costs[n] = f_reflected;
            } else {
                let (contracted, bound) = if f_reflected < f_worst {
                    (lerp(&centroid, &reflected, 0.5), f_reflected)
                } else {
                    (lerp(&centroid, &worst, 0.5), f_worst)
                };
                let f_contracted = eval(&contracted);
                if f_contracted < bound {
                    simplex[n] = contracted;
                    costs[n] = f_contracted;
                } else {
                    let best = simplex[0].clone();
                    for i in 1..=n {
                        simplex[i] = lerp(&best, &simplex[i], 0.5);
                        costs[i] = eval(&simplex[i]);
                    }
                }
            }

            sort_simplex(&mut simplex, &mut costs);
            history.push(costs[0]);
            trace!(
                iteration = num_iterations,
                best = costs[0],
                params = ?simplex[0],
                "Nelder-Mead step"
            );
        }

        if !converged && self.converged(&simplex, &costs) {
            converged = true;
        }

        OptimizationResult {
            optimal_params: simplex.swap_remove(0),
            optimal_value: costs[0],
            num_evaluations,
            num_iterations,
            history,
            converged,
        }
    }
}
