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

//! # Limit Calculator Module
//!
//! Computes a `(lower, upper)` acceptance bound pair for one feature
//! under a caller-selected method. Defaults are skew-aware: a skewed
//! sample gets asymmetric multiples favoring the heavier tail, and every
//! default is overridable through [`SiftLimitParams`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyze::classify::SKEW_THRESHOLD;
use crate::analyze::stats;
use crate::config::SiftLimitParams;
use crate::errors::{Result, SiftError};

/// Symmetric sigma multiple for unskewed data.
pub const DEFAULT_SIGMA: f64 = 3.0;
/// `(lower, upper)` sigma multiples for right-skewed data: tighter on the
/// concentrated left side, wider on the long right tail.
pub const RIGHT_SKEW_SIGMA: (f64, f64) = (2.5, 3.5);
/// `(lower, upper)` sigma multiples for left-skewed data.
pub const LEFT_SKEW_SIGMA: (f64, f64) = (3.5, 2.5);

/// Symmetric IQR multiple for unskewed data.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
/// `(lower, upper)` IQR multiples for right-skewed data.
pub const RIGHT_SKEW_IQR: (f64, f64) = (1.3, 2.0);
/// `(lower, upper)` IQR multiples for left-skewed data.
pub const LEFT_SKEW_IQR: (f64, f64) = (2.0, 1.3);

/// Default percentile cuts for the manual percentile method.
pub const DEFAULT_PERCENTILES: (f64, f64) = (1.0, 99.0);

/// The caller-selectable limit methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiftLimitMethod {
    /// Mean ± k·σ with skew-aware asymmetric defaults.
    #[serde(rename = "3sigma")]
    ThreeSigma,
    /// Q1 − m·IQR / Q3 + m·IQR with skew-aware asymmetric defaults.
    Iqr,
    /// Direct percentile cuts.
    Percentile,
}

impl FromStr for SiftLimitMethod {
    type Err = SiftError;

    /// Unsupported method names are a caller error, rejected before any
    /// computation.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "3sigma" => Ok(SiftLimitMethod::ThreeSigma),
            "iqr" => Ok(SiftLimitMethod::Iqr),
            "percentile" => Ok(SiftLimitMethod::Percentile),
            other => Err(SiftError::validation(format!(
                "unsupported limit method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SiftLimitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiftLimitMethod::ThreeSigma => "3sigma",
            SiftLimitMethod::Iqr => "iqr",
            SiftLimitMethod::Percentile => "percentile",
        };
        f.write_str(name)
    }
}

/// Computes `(lower, upper)` bound pairs for one feature.
#[derive(Clone, Debug, Default)]
pub struct SiftLimitCalculator;

impl SiftLimitCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes bounds for `values` under `method`, resolving each
    /// parameter as: explicit override → skew-aware default.
    pub fn compute(
        &self,
        values: &[f64],
        method: SiftLimitMethod,
        params: &SiftLimitParams,
    ) -> Result<(f64, f64)> {
        if values.is_empty() {
            return Err(SiftError::validation(
                "cannot compute limits over an empty value set",
            ));
        }

        let skewness = stats::skewness(values).unwrap_or(0.0);
        let is_skewed = skewness.abs() > SKEW_THRESHOLD;

        match method {
            SiftLimitMethod::ThreeSigma => {
                let mean = stats::mean(values).unwrap_or(0.0);
                // A single observation has no spread; the bounds collapse
                // onto it instead of failing.
                let std = stats::sample_std(values).unwrap_or(0.0);
                let (default_lo, default_hi) = if is_skewed {
                    if skewness > 0.0 {
                        RIGHT_SKEW_SIGMA
                    } else {
                        LEFT_SKEW_SIGMA
                    }
                } else {
                    (DEFAULT_SIGMA, DEFAULT_SIGMA)
                };
                let k_lo = params.lower_param.unwrap_or(default_lo);
                let k_hi = params.upper_param.unwrap_or(default_hi);
                Ok((mean - k_lo * std, mean + k_hi * std))
            }
            SiftLimitMethod::Iqr => {
                let (q1, q3) = stats::quartiles(values)
                    .ok_or_else(|| SiftError::internal("quartiles over non-empty input"))?;
                let iqr = q3 - q1;
                let (default_lo, default_hi) = if is_skewed {
                    if skewness > 0.0 {
                        RIGHT_SKEW_IQR
                    } else {
                        LEFT_SKEW_IQR
                    }
                } else {
                    (DEFAULT_IQR_MULTIPLIER, DEFAULT_IQR_MULTIPLIER)
                };
                let m_lo = params.lower_multiplier.unwrap_or(default_lo);
                let m_hi = params.upper_multiplier.unwrap_or(default_hi);
                Ok((q1 - m_lo * iqr, q3 + m_hi * iqr))
            }
            SiftLimitMethod::Percentile => {
                let p_lo = params.lower_percentile.unwrap_or(DEFAULT_PERCENTILES.0);
                let p_hi = params.upper_percentile.unwrap_or(DEFAULT_PERCENTILES.1);
                if !(0.0..=100.0).contains(&p_lo) || !(0.0..=100.0).contains(&p_hi) || p_lo >= p_hi
                {
                    return Err(SiftError::validation(format!(
                        "invalid percentile cuts ({}, {})",
                        p_lo, p_hi
                    )));
                }
                let lower = stats::percentile(values, p_lo)
                    .ok_or_else(|| SiftError::internal("percentile over non-empty input"))?;
                let upper = stats::percentile(values, p_hi)
                    .ok_or_else(|| SiftError::internal("percentile over non-empty input"))?;
                Ok((lower, upper))
            }
        }
    }
}
