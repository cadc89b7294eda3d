//! Confidence-weighted combination of the classifier and reference-curve labels.

use crowdcast_core::config::ForecastConfig;
use crowdcast_core::constants::NUM_LEVELS;
use crowdcast_core::models::CongestionLevel;
use serde::{Deserialize, Serialize};

/// How much each signal counts. `model + reference == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub model: f64,
    pub reference: f64,
}

impl BlendWeights {
    /// Weights for a model fitted on `samples` examples.
    ///
    /// The model weight rises linearly from `model_weight_min` at
    /// `min_samples` to `model_weight_max` at `full_trust_samples`, then is
    /// floored at `model_weight_base`.
    pub fn for_samples(samples: usize, config: &ForecastConfig) -> Self {
        let span = config.full_trust_samples.saturating_sub(config.min_samples) as f64;
        let ratio = if span > 0.0 {
            ((samples as f64 - config.min_samples as f64) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let interpolated = config.model_weight_min
            + (config.model_weight_max - config.model_weight_min) * ratio;
        let model = interpolated.max(config.model_weight_base).clamp(0.0, 1.0);
        Self {
            model,
            reference: 1.0 - model,
        }
    }

    /// No model: the reference curve decides alone.
    pub fn reference_only() -> Self {
        Self {
            model: 0.0,
            reference: 1.0,
        }
    }
}

/// Pick the final label.
///
/// Without a model label the reference label is returned as is (it is already
/// `Medium` when the curve had nothing to say). Otherwise both weights are
/// accumulated into a per-level score table and the highest score wins; on an
/// exact tie the model's label is kept.
pub fn blend(
    model_label: Option<CongestionLevel>,
    reference_label: CongestionLevel,
    weights: BlendWeights,
) -> CongestionLevel {
    let Some(model_label) = model_label else {
        return reference_label;
    };

    let mut scores = [0.0f64; NUM_LEVELS];
    scores[model_label.index()] += weights.model;
    scores[reference_label.index()] += weights.reference;

    let mut best = model_label;
    for level in CongestionLevel::ALL {
        if scores[level.index()] > scores[best.index()] {
            best = level;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ForecastConfig {
        ForecastConfig::default()
    }

    #[test]
    fn weight_ramp_is_floored_at_the_baseline() {
        let cfg = config();
        assert!((BlendWeights::for_samples(20, &cfg).model - 0.70).abs() < 1e-12);
        assert!((BlendWeights::for_samples(40, &cfg).model - 0.70).abs() < 1e-12);
        // 0.55 + 0.35 * 0.5 = 0.725
        assert!((BlendWeights::for_samples(60, &cfg).model - 0.725).abs() < 1e-12);
        assert!((BlendWeights::for_samples(100, &cfg).model - 0.90).abs() < 1e-12);
        assert!((BlendWeights::for_samples(5_000, &cfg).model - 0.90).abs() < 1e-12);
    }

    #[test]
    fn weights_sum_to_one() {
        let cfg = config();
        for n in [0, 19, 20, 21, 57, 99, 100, 101, 10_000] {
            let w = BlendWeights::for_samples(n, &cfg);
            assert!((w.model + w.reference - 1.0).abs() < 1e-12);
        }
        let w = BlendWeights::reference_only();
        assert_eq!(w.model + w.reference, 1.0);
    }

    #[test]
    fn degenerate_sample_range_trusts_fully() {
        let cfg = ForecastConfig {
            min_samples: 50,
            full_trust_samples: 50,
            ..config()
        };
        assert!((BlendWeights::for_samples(50, &cfg).model - 0.90).abs() < 1e-12);
    }

    #[test]
    fn missing_model_uses_reference() {
        let w = BlendWeights::reference_only();
        assert_eq!(blend(None, CongestionLevel::High, w), CongestionLevel::High);
        assert_eq!(blend(None, CongestionLevel::Medium, w), CongestionLevel::Medium);
    }

    #[test]
    fn model_dominates_once_trusted() {
        let w = BlendWeights::for_samples(100, &config());
        assert_eq!(
            blend(Some(CongestionLevel::High), CongestionLevel::Low, w),
            CongestionLevel::High
        );
    }

    #[test]
    fn reference_wins_when_it_outweighs_the_model() {
        let w = BlendWeights {
            model: 0.3,
            reference: 0.7,
        };
        assert_eq!(
            blend(Some(CongestionLevel::High), CongestionLevel::Low, w),
            CongestionLevel::Low
        );
    }

    #[test]
    fn exact_tie_keeps_the_model_label() {
        let w = BlendWeights {
            model: 0.5,
            reference: 0.5,
        };
        assert_eq!(
            blend(Some(CongestionLevel::High), CongestionLevel::Low, w),
            CongestionLevel::High
        );
        assert_eq!(
            blend(Some(CongestionLevel::Low), CongestionLevel::High, w),
            CongestionLevel::Low
        );
    }
}
