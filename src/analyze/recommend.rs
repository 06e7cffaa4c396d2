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

//! # Adaptive Limit Recommendation Module
//!
//! Selects and parameterizes a limit method for one feature from its
//! classified distribution shape, magnitude, zero-crossing behavior, and
//! the caller's strictness tier. The dispatch is a match over the
//! distribution label into one pure function per label, each taking the
//! same normalized parameter bundle, so every numeric branch is testable
//! in isolation.
//!
//! The multiplier families and thresholds below are empirically chosen
//! and carried as named constants; they are not re-derived.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyze::classify::{SiftDistributionClassifier, SiftDistributionLabel, SiftDistributionProfile};
use crate::analyze::stats;
use crate::config::SiftStrictness;
use crate::errors::{Result, SiftError};

/// Magnitude above which relative (percentile/CV) bounds replace
/// absolute sigma/IQR bounds.
pub const LARGE_MAGNITUDE_THRESHOLD: f64 = 300.0;

/// Values within this distance of zero count as zero-crossing.
pub const ZERO_EPSILON: f64 = 1e-10;

/// Coefficient of variation used when the mean itself is zero.
pub const CV_FALLBACK: f64 = 0.1;

/// Tukey outlier ratio above which skewed data switches from sigma to
/// IQR bounds.
pub const OUTLIER_RATIO_THRESHOLD: f64 = 0.1;

/// Sigma multiple for not-large normal data (scaled by strict factor).
pub const NORMAL_SIGMA: f64 = 2.5;
/// Sigma multiple applied to the coefficient of variation for large
/// zero-crossing data.
pub const LARGE_CV_SIGMA: f64 = 2.0;
/// `(light, heavy)` sigma multiples for skewed low-outlier data; the
/// heavier tail gets the wider multiple.
pub const SKEW_SIGMA: (f64, f64) = (2.0, 2.5);
/// `(light, heavy)` CV multiples for skewed large zero-crossing data.
pub const SKEW_LARGE_CV: (f64, f64) = (1.5, 2.0);
/// `(light, heavy)` IQR multiples for skewed high-outlier data.
pub const SKEW_IQR: (f64, f64) = (1.0, 1.5);
/// `(light, heavy)` IQR multiples for skewed high-outlier data that is
/// both large and zero-crossing.
pub const SKEW_LARGE_ZERO_IQR: (f64, f64) = (0.5, 1.0);
/// IQR multiple for the lognormal support-violation fallback.
pub const LOGNORMAL_FALLBACK_IQR: f64 = 1.2;
/// Sigma multiple applied in log space for lognormal data.
pub const LOG_SPACE_SIGMA: f64 = 2.0;

/// The method family a recommendation ended up using.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiftRecommendedMethod {
    #[serde(rename = "3sigma")]
    ThreeSigma,
    Iqr,
    Percentile,
    Lognormal,
    Range,
}

impl fmt::Display for SiftRecommendedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiftRecommendedMethod::ThreeSigma => "3sigma",
            SiftRecommendedMethod::Iqr => "iqr",
            SiftRecommendedMethod::Percentile => "percentile",
            SiftRecommendedMethod::Lognormal => "lognormal",
            SiftRecommendedMethod::Range => "range",
        };
        f.write_str(name)
    }
}

/// One recommendation: the bound pair and the method that produced it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SiftRecommendation {
    pub lower: f64,
    pub upper: f64,
    pub method: SiftRecommendedMethod,
}

/// Percentile cuts for normal/skewed/lognormal large-magnitude data:
/// a thin slice off each edge, tier-dependent.
fn edge_percentiles(strictness: SiftStrictness) -> (f64, f64) {
    match strictness {
        SiftStrictness::Strict => (1.0, 99.0),
        SiftStrictness::Balanced => (0.75, 99.25),
        SiftStrictness::Loose => (0.5, 99.5),
    }
}

/// Percentile cuts for t-distribution/uniform/unknown large-magnitude
/// data: a deeper tail cut, tier-dependent.
fn tail_percentiles(strictness: SiftStrictness) -> (f64, f64) {
    match strictness {
        SiftStrictness::Strict => (2.5, 97.5),
        SiftStrictness::Balanced => (1.0, 99.0),
        SiftStrictness::Loose => (0.5, 99.5),
    }
}

/// Range-extension fraction for not-large uniform data.
fn uniform_extension(strictness: SiftStrictness) -> f64 {
    match strictness {
        SiftStrictness::Strict => 0.01,
        SiftStrictness::Balanced => 0.03,
        SiftStrictness::Loose => 0.05,
    }
}

/// IQR multiple for not-large unknown-shape data.
fn unknown_iqr_multiplier(strictness: SiftStrictness) -> f64 {
    match strictness {
        SiftStrictness::Strict => 0.8,
        SiftStrictness::Balanced => 1.2,
        SiftStrictness::Loose => 1.5,
    }
}

/// The normalized parameter bundle every per-label function consumes.
#[derive(Clone, Debug)]
struct RecommendContext<'a> {
    values: &'a [f64],
    mean: f64,
    std: f64,
    q1: f64,
    q3: f64,
    iqr: f64,
    min: f64,
    max: f64,
    has_zero: bool,
    is_large: bool,
    strictness: SiftStrictness,
    strict_factor: f64,
    large_value_factor: f64,
}

impl<'a> RecommendContext<'a> {
    fn new(values: &'a [f64], strictness: SiftStrictness) -> Result<Self> {
        if values.is_empty() {
            return Err(SiftError::validation(
                "cannot recommend limits over an empty value set",
            ));
        }
        let mean = stats::mean(values).unwrap_or(0.0);
        let std = stats::sample_std(values).unwrap_or(0.0);
        let (q1, q3) = stats::quartiles(values).unwrap_or((mean, mean));
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let magnitude = min.abs().max(max.abs());
        let is_large = magnitude > LARGE_MAGNITUDE_THRESHOLD;
        Ok(Self {
            values,
            mean,
            std,
            q1,
            q3,
            iqr: q3 - q1,
            min,
            max,
            has_zero: values.iter().any(|v| v.abs() < ZERO_EPSILON),
            is_large,
            strictness,
            strict_factor: strictness.strict_factor(),
            large_value_factor: strictness.large_value_factor(is_large),
        })
    }

    fn percentile(&self, p: f64) -> f64 {
        stats::percentile(self.values, p).unwrap_or(self.mean)
    }

    /// Relative bounds around the mean scaled by the coefficient of
    /// variation; a zero mean uses the fixed CV fallback instead of
    /// dividing by zero.
    fn cv_bounds(&self, sigma_lower: f64, sigma_upper: f64) -> (f64, f64) {
        let cv = if self.mean != 0.0 {
            self.std / self.mean.abs()
        } else {
            CV_FALLBACK
        };
        (
            self.mean * (1.0 - sigma_lower * cv),
            self.mean * (1.0 + sigma_upper * cv),
        )
    }

    fn edge_percentile_bounds(&self) -> (f64, f64) {
        let (p_lo, p_hi) = edge_percentiles(self.strictness);
        (self.percentile(p_lo), self.percentile(p_hi))
    }
}

/// Which tail is heavier for a skewed distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HeavyTail {
    Right,
    Left,
}

impl HeavyTail {
    /// Orients a `(light, heavy)` multiple pair into `(lower, upper)`.
    fn orient(self, pair: (f64, f64)) -> (f64, f64) {
        match self {
            HeavyTail::Right => pair,
            HeavyTail::Left => (pair.1, pair.0),
        }
    }
}

/// Adaptive limit recommender.
///
/// `recommend` classifies the values and dispatches on the label; every
/// branch finishes with the same non-negativity clamp: a negative lower
/// bound is raised to zero when the data itself never goes negative.
#[derive(Clone, Debug, Default)]
pub struct SiftAdaptiveRecommender {
    classifier: SiftDistributionClassifier,
}

impl SiftAdaptiveRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `values` and recommends a bound pair.
    pub fn recommend(
        &self,
        values: &[f64],
        strictness: SiftStrictness,
    ) -> Result<SiftRecommendation> {
        let profile = self.classifier.classify(values);
        self.recommend_with_profile(values, &profile, strictness)
    }

    /// Recommends with an already-computed profile.
    pub fn recommend_with_profile(
        &self,
        values: &[f64],
        profile: &SiftDistributionProfile,
        strictness: SiftStrictness,
    ) -> Result<SiftRecommendation> {
        let ctx = RecommendContext::new(values, strictness)?;

        let mut rec = match profile.label {
            SiftDistributionLabel::Normal | SiftDistributionLabel::NearNormal => {
                recommend_normal(&ctx)
            }
            SiftDistributionLabel::RightSkewed => {
                recommend_skewed(&ctx, profile.outlier_ratio, HeavyTail::Right)
            }
            SiftDistributionLabel::LeftSkewed => {
                recommend_skewed(&ctx, profile.outlier_ratio, HeavyTail::Left)
            }
            SiftDistributionLabel::Lognormal => recommend_lognormal(&ctx),
            SiftDistributionLabel::TDistribution => recommend_heavy_tailed(&ctx),
            SiftDistributionLabel::Uniform => recommend_uniform(&ctx),
            SiftDistributionLabel::Unknown => recommend_unknown(&ctx),
        };

        if rec.lower < 0.0 && ctx.min >= 0.0 {
            rec.lower = 0.0;
        }
        Ok(rec)
    }
}

/// Normal and near-normal data: symmetric sigma bounds, switching to
/// CV/percentile bounds at large magnitude.
fn recommend_normal(ctx: &RecommendContext<'_>) -> SiftRecommendation {
    let (lower, upper) = if ctx.is_large {
        if ctx.has_zero {
            let sigma = LARGE_CV_SIGMA * ctx.strict_factor * ctx.large_value_factor;
            ctx.cv_bounds(sigma, sigma)
        } else {
            ctx.edge_percentile_bounds()
        }
    } else {
        let sigma = NORMAL_SIGMA * ctx.strict_factor;
        (ctx.mean - sigma * ctx.std, ctx.mean + sigma * ctx.std)
    };
    SiftRecommendation {
        lower,
        upper,
        method: SiftRecommendedMethod::ThreeSigma,
    }
}

/// Skewed data: IQR bounds when outliers are plentiful, adjusted sigma
/// bounds otherwise, each favoring the heavier tail; large magnitude
/// falls back to CV or percentile bounds.
fn recommend_skewed(
    ctx: &RecommendContext<'_>,
    outlier_ratio: f64,
    tail: HeavyTail,
) -> SiftRecommendation {
    if outlier_ratio > OUTLIER_RATIO_THRESHOLD {
        if ctx.is_large && !ctx.has_zero {
            let (lower, upper) = ctx.edge_percentile_bounds();
            return SiftRecommendation {
                lower,
                upper,
                method: SiftRecommendedMethod::Percentile,
            };
        }
        let scale = if ctx.is_large {
            ctx.strict_factor * ctx.large_value_factor
        } else {
            ctx.strict_factor
        };
        let pair = if ctx.is_large { SKEW_LARGE_ZERO_IQR } else { SKEW_IQR };
        let (m_lo, m_hi) = tail.orient(pair);
        SiftRecommendation {
            lower: ctx.q1 - m_lo * scale * ctx.iqr,
            upper: ctx.q3 + m_hi * scale * ctx.iqr,
            method: SiftRecommendedMethod::Iqr,
        }
    } else {
        let (lower, upper) = if ctx.is_large {
            if ctx.has_zero {
                let scale = ctx.strict_factor * ctx.large_value_factor;
                let (s_lo, s_hi) = tail.orient(SKEW_LARGE_CV);
                ctx.cv_bounds(s_lo * scale, s_hi * scale)
            } else {
                ctx.edge_percentile_bounds()
            }
        } else {
            let (s_lo, s_hi) = tail.orient(SKEW_SIGMA);
            (
                ctx.mean - s_lo * ctx.std * ctx.strict_factor,
                ctx.mean + s_hi * ctx.std * ctx.strict_factor,
            )
        };
        SiftRecommendation {
            lower,
            upper,
            method: SiftRecommendedMethod::ThreeSigma,
        }
    }
}

/// Lognormal data: sigma bounds in log space, exponentiated back.
/// Non-positive values violate the distribution's support and fall back
/// to IQR bounds; large magnitude uses percentile bounds.
fn recommend_lognormal(ctx: &RecommendContext<'_>) -> SiftRecommendation {
    if ctx.min <= 0.0 {
        let width = LOGNORMAL_FALLBACK_IQR * ctx.iqr * ctx.strict_factor;
        return SiftRecommendation {
            lower: (ctx.q1 - width).max(0.0),
            upper: ctx.q3 + width,
            method: SiftRecommendedMethod::Iqr,
        };
    }
    if ctx.is_large {
        let (lower, upper) = ctx.edge_percentile_bounds();
        return SiftRecommendation {
            lower,
            upper,
            method: SiftRecommendedMethod::Percentile,
        };
    }
    let logs: Vec<f64> = ctx.values.iter().map(|v| v.ln()).collect();
    let log_mean = stats::mean(&logs).unwrap_or(0.0);
    let log_std = stats::sample_std(&logs).unwrap_or(0.0);
    let sigma = LOG_SPACE_SIGMA * ctx.strict_factor;
    SiftRecommendation {
        lower: (log_mean - sigma * log_std).exp(),
        upper: (log_mean + sigma * log_std).exp(),
        method: SiftRecommendedMethod::Lognormal,
    }
}

/// Heavy-tailed symmetric data: tier percentile cuts, deepened further
/// at large magnitude.
fn recommend_heavy_tailed(ctx: &RecommendContext<'_>) -> SiftRecommendation {
    let (mut p_lo, mut p_hi) = tail_percentiles(ctx.strictness);
    if ctx.is_large {
        if p_lo < 5.0 {
            p_lo *= 2.0;
        }
        if p_hi > 95.0 {
            p_hi = 100.0 - (100.0 - p_hi) * 2.0;
        }
    }
    SiftRecommendation {
        lower: ctx.percentile(p_lo),
        upper: ctx.percentile(p_hi),
        method: SiftRecommendedMethod::Percentile,
    }
}

/// Uniform data: extend past the observed range by a tier-dependent
/// fraction; large magnitude switches to tier percentile cuts.
fn recommend_uniform(ctx: &RecommendContext<'_>) -> SiftRecommendation {
    let (lower, upper) = if ctx.is_large {
        let (p_lo, p_hi) = tail_percentiles(ctx.strictness);
        (ctx.percentile(p_lo), ctx.percentile(p_hi))
    } else {
        let extension = uniform_extension(ctx.strictness) * ctx.strict_factor;
        let range = ctx.max - ctx.min;
        (ctx.min - extension * range, ctx.max + extension * range)
    };
    SiftRecommendation {
        lower,
        upper,
        method: SiftRecommendedMethod::Range,
    }
}

/// Unknown shape: robust IQR bounds, or tier percentile cuts at large
/// magnitude.
fn recommend_unknown(ctx: &RecommendContext<'_>) -> SiftRecommendation {
    let (lower, upper) = if ctx.is_large {
        let (p_lo, p_hi) = tail_percentiles(ctx.strictness);
        (ctx.percentile(p_lo), ctx.percentile(p_hi))
    } else {
        let mult = unknown_iqr_multiplier(ctx.strictness) * ctx.strict_factor;
        (ctx.q1 - mult * ctx.iqr, ctx.q3 + mult * ctx.iqr)
    };
    SiftRecommendation {
        lower,
        upper,
        method: SiftRecommendedMethod::Iqr,
    }
}
