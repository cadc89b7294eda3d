//! Per-venue congestion classifier.
//!
//! Fits a 3-class weighted softmax regression over a [`TrainingSet`]. Training
//! is skipped below `min_samples`, and any numerical failure yields
//! [`ModelState::Unavailable`] instead of an error.

mod model;
pub mod softmax;

pub use model::CongestionModel;

use crowdcast_core::config::ForecastConfig;
use crowdcast_core::errors::ForecastError;

use crate::training::TrainingSet;

/// Diagnostics from a successful fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub samples: usize,
    pub iterations: usize,
    pub converged: bool,
    pub objective: f64,
}

/// Outcome of a training attempt.
#[derive(Debug, Clone)]
pub enum ModelState {
    Trained { model: CongestionModel, report: FitReport },
    Unavailable(ForecastError),
}

impl ModelState {
    pub fn model(&self) -> Option<&CongestionModel> {
        match self {
            Self::Trained { model, .. } => Some(model),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Trained { .. })
    }
}

/// Weighted multinomial logistic regression with L2 regularization.
#[derive(Debug, Clone)]
pub struct CongestionClassifier {
    min_samples: usize,
    regularization_c: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl CongestionClassifier {
    pub fn new(min_samples: usize, regularization_c: f64, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            min_samples,
            regularization_c,
            max_iterations,
            tolerance,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(
            config.min_samples,
            config.regularization_c,
            config.max_iterations,
            config.tolerance,
        )
    }

    /// Minimum number of examples required to fit.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Fit, reporting why a model could not be produced.
    pub fn fit(&self, set: &TrainingSet) -> Result<(CongestionModel, FitReport), ForecastError> {
        let samples = set.len();
        if samples < self.min_samples {
            return Err(ForecastError::InsufficientData {
                samples,
                required: self.min_samples,
            });
        }
        if set.features.len() != samples || set.weights.len() != samples {
            return Err(fit_failure(format!(
                "column lengths differ: features={} labels={} weights={}",
                set.features.len(),
                samples,
                set.weights.len()
            )));
        }
        if set.features.iter().flatten().any(|v| !v.is_finite()) {
            return Err(fit_failure("non-finite feature".to_string()));
        }
        if set.weights.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(fit_failure("sample weights must be finite and positive".to_string()));
        }

        let labels: Vec<usize> = set.labels.iter().map(|l| l.index()).collect();
        let problem = softmax::Problem {
            features: &set.features,
            labels: &labels,
            weights: &set.weights,
            c: self.regularization_c,
        };
        let descent =
            softmax::minimize(&problem, self.max_iterations, self.tolerance).map_err(fit_failure)?;

        let report = FitReport {
            samples,
            iterations: descent.iterations,
            converged: descent.converged,
            objective: descent.objective,
        };
        Ok((CongestionModel::new(descent.params, samples), report))
    }

    /// Fit, folding every failure into [`ModelState::Unavailable`].
    pub fn train(&self, set: &TrainingSet) -> ModelState {
        match self.fit(set) {
            Ok((model, report)) => ModelState::Trained { model, report },
            Err(e) => ModelState::Unavailable(e),
        }
    }
}

fn fit_failure(reason: String) -> ForecastError {
    ForecastError::ModelFitFailure { reason }
}
