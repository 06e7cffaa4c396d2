//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Sift.
//! The Sift project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use proptest::prelude::*;

use siftx::analyze::stats::normal_scores;
use siftx::{SiftAdaptiveRecommender, SiftRecommendedMethod, SiftStrictness};

#[test]
fn uniform_feature_gets_range_extension() {
    let values: Vec<f64> = (0..500).map(|i| 10.0 + i as f64 * 0.1).collect();
    let rec = SiftAdaptiveRecommender::new();
    let out = rec
        .recommend(&values, SiftStrictness::Balanced)
        .expect("recommend");
    assert_eq!(out.method, SiftRecommendedMethod::Range);
    assert!(out.lower < 10.0);
    assert!(out.upper > 10.0 + 499.0 * 0.1);
}

#[test]
fn lognormal_feature_gets_log_space_bounds() {
    let values: Vec<f64> = normal_scores(300).iter().map(|z| z.exp()).collect();
    let rec = SiftAdaptiveRecommender::new();
    let out = rec
        .recommend(&values, SiftStrictness::Balanced)
        .expect("recommend");
    assert_eq!(out.method, SiftRecommendedMethod::Lognormal);
    assert!(out.lower > 0.0);
    assert!(out.upper > out.lower);
}

#[test]
fn heavy_tailed_feature_gets_percentile_cuts() {
    let mut values: Vec<f64> = (-100..=100).map(|i| i as f64 / 100.0).collect();
    for _ in 0..5 {
        values.push(12.0);
        values.push(-12.0);
    }
    let rec = SiftAdaptiveRecommender::new();
    let out = rec
        .recommend(&values, SiftStrictness::Strict)
        .expect("recommend");
    assert_eq!(out.method, SiftRecommendedMethod::Percentile);
    // The 2.5/97.5 cuts trim the ten planted extremes.
    assert!(out.lower > -12.0);
    assert!(out.upper < 12.0);
}

#[test]
fn strictness_orders_recommended_widths() {
    let values: Vec<f64> = normal_scores(300).iter().map(|z| 20.0 + 2.0 * z).collect();
    let rec = SiftAdaptiveRecommender::new();

    let strict = rec.recommend(&values, SiftStrictness::Strict).expect("strict");
    let balanced = rec
        .recommend(&values, SiftStrictness::Balanced)
        .expect("balanced");
    let loose = rec.recommend(&values, SiftStrictness::Loose).expect("loose");

    assert!(strict.upper - strict.lower < balanced.upper - balanced.lower);
    assert!(balanced.upper - balanced.lower < loose.upper - loose.lower);
}

#[test]
fn large_magnitude_switches_to_relative_bounds() {
    // Same shape, two scales: past the magnitude threshold the bounds
    // come from percentile cuts inside the observed range.
    let small: Vec<f64> = (0..500).map(|i| i as f64 * 0.1).collect();
    let large: Vec<f64> = (0..500).map(|i| i as f64 * 10.0).collect();
    let rec = SiftAdaptiveRecommender::new();

    let out_small = rec
        .recommend(&small, SiftStrictness::Balanced)
        .expect("recommend");
    let out_large = rec
        .recommend(&large, SiftStrictness::Balanced)
        .expect("recommend");

    assert!(out_small.upper > 49.9);
    assert!(out_large.upper < 4990.0);
    assert!(out_large.lower > 0.0);
}

#[test]
fn method_tags_serialize_as_their_wire_names() {
    assert_eq!(
        serde_json::to_value(SiftRecommendedMethod::ThreeSigma).expect("serialize"),
        serde_json::json!("3sigma")
    );
    assert_eq!(SiftRecommendedMethod::Range.to_string(), "range");
    assert_eq!(SiftRecommendedMethod::Lognormal.to_string(), "lognormal");
}

#[test]
fn empty_values_are_rejected() {
    let rec = SiftAdaptiveRecommender::new();
    assert!(rec.recommend(&[], SiftStrictness::Strict).is_err());
}

proptest! {
    // Strictly non-negative data never gets a negative lower bound,
    // whichever branch the classification routes it through.
    #[test]
    fn non_negative_data_never_gets_a_negative_lower_bound(
        values in proptest::collection::vec(0.0f64..1000.0, 1..200),
        tier in 0usize..3,
    ) {
        let strictness = [
            SiftStrictness::Strict,
            SiftStrictness::Balanced,
            SiftStrictness::Loose,
        ][tier];
        let rec = SiftAdaptiveRecommender::new();
        let out = rec.recommend(&values, strictness).expect("recommend");
        prop_assert!(out.lower >= 0.0);
        prop_assert!(out.lower <= out.upper);
    }
}
