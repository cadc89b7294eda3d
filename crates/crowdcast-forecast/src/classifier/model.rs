use crowdcast_core::constants::NUM_LEVELS;
use crowdcast_core::models::CongestionLevel;

use super::softmax::{self, Params};
use crate::features::TimeFeatures;

/// A fitted per-venue congestion model.
#[derive(Debug, Clone, PartialEq)]
pub struct CongestionModel {
    params: Params,
    samples: usize,
}

impl CongestionModel {
    pub(crate) fn new(params: Params, samples: usize) -> Self {
        Self { params, samples }
    }

    /// Number of examples the model was fitted on.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Class posterior probabilities in class order.
    pub fn predict_proba(&self, features: &TimeFeatures) -> [f64; NUM_LEVELS] {
        softmax::softmax(self.params.logits(&features.as_array()))
    }

    /// Most probable level and its probability.
    ///
    /// On an exact probability tie the lowest level wins.
    pub fn predict(&self, features: &TimeFeatures) -> (CongestionLevel, f64) {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for k in 1..NUM_LEVELS {
            if proba[k] > proba[best] {
                best = k;
            }
        }
        let level = CongestionLevel::from_index(best).unwrap_or_default();
        (level, proba[best])
    }
}
