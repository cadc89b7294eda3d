//! Weighted multinomial logistic regression, fitted by gradient descent with
//! Armijo backtracking.
//!
//! ```text
//! minimize  0.5 · ‖W‖²  +  C · Σᵢ sᵢ · (logsumexp(W·xᵢ + b) − (W·xᵢ + b)[yᵢ])
//! ```
//!
//! Intercepts are not penalized. The objective is convex and smooth, so plain
//! descent with a sufficient-decrease line search converges; the step length
//! is carried over between iterations and doubled before each search.

use crowdcast_core::constants::{NUM_FEATURES, NUM_LEVELS};

/// Largest step the line search will try.
const MAX_STEP: f64 = 1e4;

/// Below this step length the search is considered stalled.
const MIN_STEP: f64 = 1e-14;

/// Armijo sufficient-decrease constant.
const ARMIJO_C: f64 = 0.5;

/// Coefficients and intercepts, one row per class.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Params {
    pub weights: [[f64; NUM_FEATURES]; NUM_LEVELS],
    pub intercepts: [f64; NUM_LEVELS],
}

impl Params {
    fn axpy(&self, step: f64, direction: &Params) -> Params {
        let mut out = *self;
        for k in 0..NUM_LEVELS {
            for j in 0..NUM_FEATURES {
                out.weights[k][j] -= step * direction.weights[k][j];
            }
            out.intercepts[k] -= step * direction.intercepts[k];
        }
        out
    }

    fn max_abs(&self) -> f64 {
        self.weights
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()))
    }

    fn squared_norm(&self) -> f64 {
        self.weights
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .map(|v| v * v)
            .sum()
    }

    /// Raw class scores for one sample.
    pub fn logits(&self, x: &[f64; NUM_FEATURES]) -> [f64; NUM_LEVELS] {
        let mut z = self.intercepts;
        for (k, zk) in z.iter_mut().enumerate() {
            *zk += self.weights[k].iter().zip(x).map(|(w, xi)| w * xi).sum::<f64>();
        }
        z
    }
}

/// Numerically stable softmax.
pub fn softmax(z: [f64; NUM_LEVELS]) -> [f64; NUM_LEVELS] {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut p = z.map(|v| (v - max).exp());
    let sum: f64 = p.iter().sum();
    for v in p.iter_mut() {
        *v /= sum;
    }
    p
}

fn log_sum_exp(z: &[f64; NUM_LEVELS]) -> f64 {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max + z.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Borrowed training columns.
pub struct Problem<'a> {
    pub features: &'a [[f64; NUM_FEATURES]],
    pub labels: &'a [usize],
    pub weights: &'a [f64],
    pub c: f64,
}

impl Problem<'_> {
    /// Objective value only.
    pub fn value(&self, params: &Params) -> f64 {
        let penalty: f64 = 0.5 * params.weights.iter().flatten().map(|w| w * w).sum::<f64>();
        let data: f64 = self
            .features
            .iter()
            .zip(self.labels)
            .zip(self.weights)
            .map(|((x, &y), &s)| {
                let z = params.logits(x);
                s * (log_sum_exp(&z) - z[y])
            })
            .sum();
        penalty + self.c * data
    }

    /// Objective value and gradient.
    pub fn value_and_gradient(&self, params: &Params) -> (f64, Params) {
        let mut grad = Params {
            weights: params.weights,
            intercepts: [0.0; NUM_LEVELS],
        };
        let mut data = 0.0;

        for ((x, &y), &s) in self.features.iter().zip(self.labels).zip(self.weights) {
            let z = params.logits(x);
            data += s * (log_sum_exp(&z) - z[y]);

            let p = softmax(z);
            for k in 0..NUM_LEVELS {
                let residual = self.c * s * (p[k] - if k == y { 1.0 } else { 0.0 });
                for j in 0..NUM_FEATURES {
                    grad.weights[k][j] += residual * x[j];
                }
                grad.intercepts[k] += residual;
            }
        }

        let penalty: f64 = 0.5 * params.weights.iter().flatten().map(|w| w * w).sum::<f64>();
        (penalty + self.c * data, grad)
    }
}

/// Result of a descent run.
#[derive(Debug, Clone, Copy)]
pub struct Descent {
    pub params: Params,
    pub objective: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimize the problem from the zero vector.
///
/// Returns `Err` with a short reason as soon as the objective or gradient
/// stops being finite.
pub fn minimize(problem: &Problem<'_>, max_iterations: usize, tolerance: f64) -> Result<Descent, String> {
    let mut params = Params::default();
    let mut step: f64 = 1.0;
    let (mut objective, mut grad) = problem.value_and_gradient(&params);

    for iteration in 0..max_iterations {
        if !objective.is_finite() {
            return Err(format!("objective not finite at iteration {iteration}"));
        }
        let grad_max = grad.max_abs();
        if !grad_max.is_finite() {
            return Err(format!("gradient not finite at iteration {iteration}"));
        }
        if grad_max < tolerance {
            return Ok(Descent {
                params,
                objective,
                iterations: iteration,
                converged: true,
            });
        }

        let grad_sq = grad.squared_norm();
        step = (step * 2.0).min(MAX_STEP);
        let candidate = loop {
            let candidate = params.axpy(step, &grad);
            let value = problem.value(&candidate);
            if value.is_finite() && value <= objective - ARMIJO_C * step * grad_sq {
                break Some(candidate);
            }
            step *= 0.5;
            if step < MIN_STEP {
                break None;
            }
        };

        let Some(next) = candidate else {
            // No descent possible at machine precision: we are at the optimum.
            return Ok(Descent {
                params,
                objective,
                iterations: iteration,
                converged: true,
            });
        };

        params = next;
        (objective, grad) = problem.value_and_gradient(&params);
    }

    if !objective.is_finite() {
        return Err("objective not finite after final iteration".to_string());
    }
    Ok(Descent {
        params,
        objective,
        iterations: max_iterations,
        converged: grad.max_abs() < tolerance,
    })
}
