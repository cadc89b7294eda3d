//! # crowdcast-forecast
//!
//! Predicts a venue's congestion level (low / medium / high) at minute offsets
//! from now by blending two signals:
//!
//! | Signal | Source |
//! |--------|--------|
//! | Classifier | Weighted softmax regression over recent visit reports |
//! | Reference curve | Typical busyness by hour of week, interpolated per minute |
//!
//! ## Pipeline
//!
//! `features` → `training` → `classifier` → `reference` → `blender`, orchestrated
//! by [`ForecastEngine`], which also writes the "now" level back to the store
//! and memoizes it per venue and 5-minute bucket in [`NowCache`].
//!
//! Every public forecasting entry point always returns a level. Sparse data,
//! malformed curves, fit failures and store failures degrade to the reference
//! curve, the persisted level, or `medium`.

pub mod blender;
pub mod cache;
pub mod classifier;
pub mod engine;
pub mod features;
pub mod reference;
pub mod training;

pub use blender::{blend, BlendWeights};
pub use cache::{BucketKey, Lookup, NowCache};
pub use classifier::{CongestionClassifier, CongestionModel, FitReport, ModelState};
pub use engine::ForecastEngine;
pub use features::{encode, TimeFeatures};
pub use reference::ReferenceCurveInterpolator;
pub use training::{TrainingSet, TrainingSetCollector};
