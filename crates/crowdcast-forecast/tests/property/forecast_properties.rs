//! Property tests for the forecasting building blocks.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use crowdcast_core::config::ForecastConfig;
use crowdcast_core::models::{ReferenceCurve, VenueId, VisitReport};
use crowdcast_forecast::training::recency_weight;
use crowdcast_forecast::{encode, BlendWeights, ReferenceCurveInterpolator, TrainingSetCollector};
use proptest::prelude::*;

// 2020-01-01 .. 2030-01-01 in seconds.
const MIN_SECS: i64 = 1_577_836_800;
const MAX_SECS: i64 = 1_893_456_000;

fn instant(secs: i64, offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .timestamp_opt(secs, 0)
        .unwrap()
}

proptest! {
    #[test]
    fn encoding_lies_on_the_unit_circles(secs in MIN_SECS..MAX_SECS, tz in -12i32..=14) {
        let f = encode(&instant(secs, tz));
        prop_assert!((f.h_sin.powi(2) + f.h_cos.powi(2) - 1.0).abs() < 1e-9);
        prop_assert!((f.w_sin.powi(2) + f.w_cos.powi(2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recency_weights_are_positive(age in -1e3f64..1e7, half_life in 0.01f64..1e4) {
        let w = recency_weight(age, half_life);
        prop_assert!(w > 0.0);
        prop_assert!(w <= 1.0);
    }

    #[test]
    fn training_weights_are_positive(
        now_secs in MIN_SECS..MAX_SECS,
        ages in prop::collection::vec(0i64..(30 * 24 * 60), 0..60),
    ) {
        let now = instant(now_secs, 9);
        let reports: Vec<VisitReport> = ages
            .iter()
            .map(|m| VisitReport::new(VenueId(1), (now - Duration::minutes(*m)).with_timezone(&Utc), "high"))
            .collect();
        let set = TrainingSetCollector::from_config(&ForecastConfig::default()).build(&reports, &now);
        prop_assert_eq!(set.len(), reports.len());
        prop_assert!(set.weights.iter().all(|w| *w > 0.0 && w.is_finite()));
    }

    #[test]
    fn blend_weights_sum_to_one(samples in 0usize..100_000) {
        let w = BlendWeights::for_samples(samples, &ForecastConfig::default());
        prop_assert!((w.model + w.reference - 1.0).abs() < 1e-12);
        prop_assert!(w.model >= 0.70 && w.model <= 0.90);
    }

    #[test]
    fn interpolation_stays_between_bracketing_hours(
        hours in prop::array::uniform24(0u8..=100),
        next_day in prop::array::uniform24(0u8..=100),
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let mut curve = ReferenceCurve::new();
        // 2025-03-05 is a Wednesday (weekday 2).
        curve.set_day(2, hours).unwrap();
        curve.set_day(3, next_day).unwrap();
        let at = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 5, hour, minute, 0)
            .unwrap();

        let p0 = hours[hour as usize];
        let p1 = if hour < 23 { hours[hour as usize + 1] } else { next_day[0] };
        let p = ReferenceCurveInterpolator::default().percent_at(Some(&curve), &at).unwrap();
        prop_assert!(p >= p0.min(p1) && p <= p0.max(p1), "{} not within [{}, {}]", p, p0, p1);
    }

    #[test]
    fn last_hour_without_next_day_holds_flat(
        weekday in 0usize..7,
        hours in prop::array::uniform24(0u8..=100),
        others in prop::collection::vec(prop::option::of(prop::array::uniform24(0u8..=100)), 7),
        minute in 0u32..60,
    ) {
        let next = (weekday + 1) % 7;
        let mut curve = ReferenceCurve::new();
        for (day, other) in others.into_iter().enumerate() {
            if let (Some(other), true) = (other, day != weekday && day != next) {
                curve.set_day(day, other).unwrap();
            }
        }
        curve.set_day(weekday, hours).unwrap();
        // 2025-03-03 is a Monday (weekday 0).
        let at = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 3 + weekday as u32, 23, minute, 0)
            .unwrap();

        let p = ReferenceCurveInterpolator::default().percent_at(Some(&curve), &at);
        prop_assert_eq!(p, Some(hours[23]));
    }
}
