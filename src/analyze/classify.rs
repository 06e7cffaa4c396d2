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

//! # Distribution Classification Module
//!
//! Maps a feature's empirical values to a coarse distribution label plus
//! the shape descriptors the recommender dispatches on. Profiles are
//! computed fresh on every call; nothing is cached here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyze::stats;

/// Minimum sample size for classification; below it the profile is the
/// degenerate "too little data, assume normal" sentinel.
pub const MIN_CLASSIFY_SAMPLES: usize = 10;

/// Significance level for the normality verdict.
pub const NORMALITY_ALPHA: f64 = 0.05;

/// Tukey fence multiplier for the outlier ratio.
pub const TUKEY_FENCE_MULTIPLIER: f64 = 1.5;

/// Skewness magnitude above which a distribution counts as skewed.
pub const SKEW_THRESHOLD: f64 = 0.5;

/// Excess-kurtosis magnitude separating heavy/light tails from normal.
pub const KURTOSIS_THRESHOLD: f64 = 0.5;

/// The fixed set of distribution shapes the recommender dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiftDistributionLabel {
    Normal,
    NearNormal,
    RightSkewed,
    LeftSkewed,
    Lognormal,
    TDistribution,
    Uniform,
    Unknown,
}

impl fmt::Display for SiftDistributionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiftDistributionLabel::Normal => "normal",
            SiftDistributionLabel::NearNormal => "near-normal",
            SiftDistributionLabel::RightSkewed => "right-skewed",
            SiftDistributionLabel::LeftSkewed => "left-skewed",
            SiftDistributionLabel::Lognormal => "lognormal",
            SiftDistributionLabel::TDistribution => "t-distribution",
            SiftDistributionLabel::Uniform => "uniform",
            SiftDistributionLabel::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Shape descriptors for one feature's empirical distribution.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SiftDistributionProfile {
    pub label: SiftDistributionLabel,
    pub skewness: f64,
    pub kurtosis: f64,
    pub is_normal: bool,
    pub normality_p_value: f64,
    /// Fraction of points outside the Tukey fences, in `[0, 1]`.
    pub outlier_ratio: f64,
}

impl SiftDistributionProfile {
    /// The sentinel profile for samples too small (or too degenerate) to
    /// say anything: "assume normal" is the conservative default for the
    /// downstream methods.
    fn degenerate() -> Self {
        Self {
            label: SiftDistributionLabel::Unknown,
            skewness: 0.0,
            kurtosis: 0.0,
            is_normal: true,
            normality_p_value: 1.0,
            outlier_ratio: 0.0,
        }
    }
}

/// Classifies empirical feature values into a [`SiftDistributionProfile`].
#[derive(Clone, Debug, Default)]
pub struct SiftDistributionClassifier;

impl SiftDistributionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Computes the profile for one feature's combined values.
    pub fn classify(&self, values: &[f64]) -> SiftDistributionProfile {
        if values.len() < MIN_CLASSIFY_SAMPLES {
            return SiftDistributionProfile::degenerate();
        }

        let skewness = stats::skewness(values).unwrap_or(0.0);
        let kurtosis = stats::kurtosis(values).unwrap_or(0.0);
        let outlier_ratio = tukey_outlier_ratio(values);

        // A failed omnibus test (near-constant data) degrades to the
        // "assume normal" sentinel with the shape measures kept.
        let (p_value, is_normal) = match stats::normality_test(values) {
            Some((_, p)) => (p, p > NORMALITY_ALPHA),
            None => (1.0, true),
        };

        let label = if is_normal {
            SiftDistributionLabel::Normal
        } else {
            decide_label(values, skewness, kurtosis)
        };

        SiftDistributionProfile {
            label,
            skewness,
            kurtosis,
            is_normal,
            normality_p_value: p_value,
            outlier_ratio,
        }
    }
}

/// The label decision tree, evaluated only for non-normal data.
fn decide_label(values: &[f64], skewness: f64, kurtosis: f64) -> SiftDistributionLabel {
    if skewness.abs() < SKEW_THRESHOLD {
        if kurtosis > KURTOSIS_THRESHOLD {
            SiftDistributionLabel::TDistribution
        } else if kurtosis < -KURTOSIS_THRESHOLD {
            SiftDistributionLabel::Uniform
        } else {
            SiftDistributionLabel::NearNormal
        }
    } else if skewness > SKEW_THRESHOLD {
        if values.iter().all(|&v| v > 0.0) && log_values_look_normal(values) {
            SiftDistributionLabel::Lognormal
        } else {
            SiftDistributionLabel::RightSkewed
        }
    } else {
        SiftDistributionLabel::LeftSkewed
    }
}

/// Re-runs the omnibus test on the natural log of strictly positive
/// values; an untestable log sample counts as not lognormal.
fn log_values_look_normal(values: &[f64]) -> bool {
    let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
    match stats::normality_test(&logs) {
        Some((_, p)) => p > NORMALITY_ALPHA,
        None => false,
    }
}

/// Fraction of values outside `Q1 - 1.5·IQR` / `Q3 + 1.5·IQR`.
fn tukey_outlier_ratio(values: &[f64]) -> f64 {
    let (q1, q3) = match stats::quartiles(values) {
        Some(q) => q,
        None => return 0.0,
    };
    let iqr = q3 - q1;
    let lower = q1 - TUKEY_FENCE_MULTIPLIER * iqr;
    let upper = q3 + TUKEY_FENCE_MULTIPLIER * iqr;
    let outliers = values.iter().filter(|&&v| v < lower || v > upper).count();
    outliers as f64 / values.len() as f64
}
