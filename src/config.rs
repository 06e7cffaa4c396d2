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

//! # Sift Configuration Module
//!
//! Explicit configuration structures consumed by the session and the
//! analysis components. Every setting the engine needs arrives by value
//! through these types; the core never probes caller state. Where the
//! caller may omit a setting, the defaulting chain is a pure function
//! with one documented precedence order:
//!
//! 1. the explicit value supplied by the caller,
//! 2. the configured default,
//! 3. the named constant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Header row used when a manual index is malformed and the caller
/// supplied no other fallback.
pub const DEFAULT_HEADER_ROW: usize = 16;

/// How the loader locates the header row of an input file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SiftHeaderMode {
    /// Scan the first lines of the raw file for the first line containing
    /// `marker`; that line is the header, the next line starts the data.
    AutoDetect { marker: char },
    /// The header sits at a fixed zero-based row index; data starts at
    /// the next row.
    Manual { header_row: usize },
}

impl Default for SiftHeaderMode {
    fn default() -> Self {
        SiftHeaderMode::AutoDetect { marker: ',' }
    }
}

impl SiftHeaderMode {
    /// Builds a manual mode from a raw textual row index. A malformed
    /// (non-numeric) index falls back to the supplied default row, per
    /// the defaulting chain documented in the module header.
    pub fn manual_from_str(raw: &str, fallback_header_row: usize) -> Self {
        let header_row = raw.trim().parse::<usize>().unwrap_or_else(|_| {
            log::warn!(
                "malformed header row '{}', falling back to row {}",
                raw,
                fallback_header_row
            );
            fallback_header_row
        });
        SiftHeaderMode::Manual { header_row }
    }
}

/// Strictness tier for adaptive recommendation: a coarse knob scaling how
/// wide recommended limits are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiftStrictness {
    Strict,
    #[default]
    Balanced,
    Loose,
}

impl SiftStrictness {
    /// The base scaling factor applied to sigma/IQR/extension widths.
    pub fn strict_factor(self) -> f64 {
        match self {
            SiftStrictness::Strict => 0.7,
            SiftStrictness::Balanced => 0.85,
            SiftStrictness::Loose => 1.0,
        }
    }

    /// The additional factor applied for large-magnitude data. Matches
    /// `strict_factor` when the data is not large.
    pub fn large_value_factor(self, is_large: bool) -> f64 {
        match (self, is_large) {
            (SiftStrictness::Strict, true) => 0.5,
            (SiftStrictness::Strict, false) => 0.7,
            (SiftStrictness::Balanced, true) => 0.65,
            (SiftStrictness::Balanced, false) => 0.85,
            (SiftStrictness::Loose, true) => 0.8,
            (SiftStrictness::Loose, false) => 1.0,
        }
    }
}

/// Tunable parameters for the limit calculator. Every field is optional;
/// the calculator resolves each against its skew-aware default.
///
/// Deserialization rejects unknown fields, so a mistyped override is a
/// caller error rather than a silently applied default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiftLimitParams {
    /// Sigma multiple below the mean (`3sigma` method).
    pub lower_param: Option<f64>,
    /// Sigma multiple above the mean (`3sigma` method).
    pub upper_param: Option<f64>,
    /// IQR multiple below Q1 (`iqr` method).
    pub lower_multiplier: Option<f64>,
    /// IQR multiple above Q3 (`iqr` method).
    pub upper_multiplier: Option<f64>,
    /// Lower percentile cut (`percentile` method).
    pub lower_percentile: Option<f64>,
    /// Upper percentile cut (`percentile` method).
    pub upper_percentile: Option<f64>,
}

impl SiftLimitParams {
    /// Parses a parameter bundle from JSON, rejecting malformed or
    /// unknown overrides before any computation runs.
    pub fn from_json(value: &serde_json::Value) -> crate::errors::Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| crate::errors::SiftError::validation(format!("invalid limit params: {}", e)))
    }
}

/// Per-feature method and parameter override.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SiftFeatureOverride {
    /// Method name (`3sigma`, `iqr`, `percentile`); `None` keeps the
    /// session-wide choice.
    pub method: Option<String>,
    /// Parameter overrides resolved against skew-aware defaults.
    #[serde(default)]
    pub params: SiftLimitParams,
}

/// Complete configuration passed by value into a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiftSessionConfig {
    /// How the loader locates header rows.
    #[serde(default)]
    pub header_mode: SiftHeaderMode,
    /// Fallback header row for malformed manual indices.
    #[serde(default = "default_header_row")]
    pub fallback_header_row: usize,
    /// Strictness tier for adaptive recommendation.
    #[serde(default)]
    pub strictness: SiftStrictness,
    /// Per-feature method and parameter overrides.
    #[serde(default)]
    pub overrides: HashMap<String, SiftFeatureOverride>,
}

fn default_header_row() -> usize {
    DEFAULT_HEADER_ROW
}

impl Default for SiftSessionConfig {
    fn default() -> Self {
        Self {
            header_mode: SiftHeaderMode::default(),
            fallback_header_row: DEFAULT_HEADER_ROW,
            strictness: SiftStrictness::default(),
            overrides: HashMap::new(),
        }
    }
}
