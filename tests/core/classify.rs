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

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use siftx::analyze::stats::normal_scores;
use siftx::{SiftDistributionClassifier, SiftDistributionLabel};

#[test]
fn fewer_than_ten_points_is_always_unknown() {
    let classifier = SiftDistributionClassifier::new();
    for values in [
        vec![1.0],
        vec![0.0; 9],
        vec![1e9, -1e9, 5.0, 0.1, 2.2, 7.7, -3.0, 4.0, 6.0],
    ] {
        let profile = classifier.classify(&values);
        assert_eq!(profile.label, SiftDistributionLabel::Unknown);
        assert!(profile.is_normal);
        assert_eq!(profile.normality_p_value, 1.0);
    }
}

#[test]
fn normal_scores_are_labeled_normal() {
    let classifier = SiftDistributionClassifier::new();
    let profile = classifier.classify(&normal_scores(250));
    assert_eq!(profile.label, SiftDistributionLabel::Normal);
    assert!(profile.is_normal);
    assert!(profile.normality_p_value > 0.05);
}

#[test]
fn uniform_grid_is_labeled_uniform() {
    let classifier = SiftDistributionClassifier::new();
    let values: Vec<f64> = (0..400).map(|i| i as f64 * 0.25).collect();
    let profile = classifier.classify(&values);
    assert_eq!(profile.label, SiftDistributionLabel::Uniform);
    assert!(!profile.is_normal);
    // A uniform grid's excess kurtosis sits near -1.2.
    assert!((profile.kurtosis + 1.2).abs() < 0.05);
}

#[test]
fn exponentiated_normal_scores_are_labeled_lognormal() {
    let classifier = SiftDistributionClassifier::new();
    let values: Vec<f64> = normal_scores(300).iter().map(|z| z.exp()).collect();
    let profile = classifier.classify(&values);
    assert_eq!(profile.label, SiftDistributionLabel::Lognormal);
    assert!(profile.skewness > 0.5);
}

#[test]
fn skewed_grids_are_labeled_by_direction() {
    let classifier = SiftDistributionClassifier::new();
    let right: Vec<f64> = (1..=500).map(|i| (i as f64 / 500.0).powi(2)).collect();
    let left: Vec<f64> = right.iter().map(|v| -v).collect();
    assert_eq!(
        classifier.classify(&right).label,
        SiftDistributionLabel::RightSkewed
    );
    assert_eq!(
        classifier.classify(&left).label,
        SiftDistributionLabel::LeftSkewed
    );
}

#[test]
fn seeded_uniform_sample_is_rejected_by_the_normality_test() {
    let mut rng = SmallRng::seed_from_u64(42);
    let values: Vec<f64> = (0..1000).map(|_| rng.gen_range(0.0..100.0)).collect();
    let classifier = SiftDistributionClassifier::new();
    let profile = classifier.classify(&values);
    assert!(!profile.is_normal);
    assert!(profile.kurtosis < -0.5);
    assert_eq!(profile.label, SiftDistributionLabel::Uniform);
}

#[test]
fn labels_serialize_in_kebab_case() {
    assert_eq!(
        serde_json::to_value(SiftDistributionLabel::RightSkewed).expect("serialize"),
        serde_json::json!("right-skewed")
    );
    assert_eq!(
        serde_json::to_value(SiftDistributionLabel::TDistribution).expect("serialize"),
        serde_json::json!("t-distribution")
    );
    assert_eq!(SiftDistributionLabel::NearNormal.to_string(), "near-normal");
}

#[test]
fn outlier_ratio_is_bounded() {
    let classifier = SiftDistributionClassifier::new();
    let mut values: Vec<f64> = (0..200).map(|i| i as f64 * 0.1).collect();
    values.push(1e7);
    values.push(-1e7);
    let profile = classifier.classify(&values);
    assert!(profile.outlier_ratio > 0.0);
    assert!(profile.outlier_ratio <= 1.0);
}
