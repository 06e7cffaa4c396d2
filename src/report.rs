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

//! # Yield Report Module
//!
//! Partitions each feature's values against its limit and rolls the
//! counts up into report rows: one row per (file, feature) pair, then
//! one synthetic aggregate row per feature over the concatenation of
//! all files. Rows are derived and stateless; persisting them to a
//! spreadsheet or any other sink is the caller's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyze::stats;
use crate::table::SiftTable;

/// File-index marker for the per-feature aggregate row.
pub const AGGREGATE_INDEX: &str = "ALL";
/// File-name label paired with [`AGGREGATE_INDEX`].
pub const AGGREGATE_NAME: &str = "ALL FILES";

/// The report's fixed column order.
pub const REPORT_COLUMNS: [&str; 12] = [
    "File Index",
    "File Name",
    "Feature",
    "Total Count",
    "Valid Count",
    "Below-Lower Count",
    "Above-Upper Count",
    "Yield",
    "Mean",
    "Std Dev",
    "Lower Limit",
    "Upper Limit",
];

/// An acceptance limit for one feature. An absent bound means "no
/// constraint on that side". When both bounds are present the producing
/// algorithms guarantee `lower <= upper`; it is not re-checked here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SiftLimit {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    /// The method tag that produced the bounds ("3sigma", "iqr", ...).
    pub method: Option<String>,
}

impl SiftLimit {
    pub fn new(lower: f64, upper: f64, method: impl Into<String>) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            method: Some(method.into()),
        }
    }
}

/// Feature name → limit. A `BTreeMap` so iteration order, and with it
/// report row order, is deterministic.
pub type SiftLimitMap = BTreeMap<String, SiftLimit>;

/// One report row, fields in the report's fixed column order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiftReportRow {
    /// 1-based file index as text, or [`AGGREGATE_INDEX`].
    pub file_index: String,
    pub file_name: String,
    pub feature: String,
    pub total: usize,
    pub valid: usize,
    pub below: usize,
    pub above: usize,
    /// `"{pct:.2}%"`, or `"N/A"` when the row has no data.
    pub yield_rate: String,
    /// Mean of the valid subset; 0 when the subset is empty.
    pub mean: f64,
    /// Sample std of the valid subset; 0 below two valid points.
    pub std_dev: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SiftReportRow {
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Computes yield report rows from loaded tables and a limit map.
#[derive(Clone, Debug, Default)]
pub struct SiftYieldReporter;

impl SiftYieldReporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the row sequence: per-file rows grouped by file (every
    /// present feature of file 1, then file 2, ...), then one aggregate
    /// row per feature.
    pub fn report(
        &self,
        features: &[String],
        tables: &[(&str, &SiftTable)],
        limits: &SiftLimitMap,
    ) -> Vec<SiftReportRow> {
        let mut rows = Vec::new();

        for (i, (name, table)) in tables.iter().enumerate() {
            for feature in features {
                if !table.has_column(feature) {
                    log::debug!("feature '{}' absent from '{}'", feature, name);
                    continue;
                }
                let limit = limits.get(feature).cloned().unwrap_or_default();
                let values = table.numeric_values(feature);
                rows.push(build_row(
                    (i + 1).to_string(),
                    (*name).to_string(),
                    feature.clone(),
                    &values,
                    &limit,
                ));
            }
        }

        for feature in features {
            let limit = limits.get(feature).cloned().unwrap_or_default();
            let combined: Vec<f64> = tables
                .iter()
                .flat_map(|(_, table)| table.numeric_values(feature))
                .collect();
            rows.push(build_row(
                AGGREGATE_INDEX.to_string(),
                AGGREGATE_NAME.to_string(),
                feature.clone(),
                &combined,
                &limit,
            ));
        }

        rows
    }
}

/// Partitions values against the limit and fills one row.
fn build_row(
    file_index: String,
    file_name: String,
    feature: String,
    values: &[f64],
    limit: &SiftLimit,
) -> SiftReportRow {
    let below = match limit.lower {
        Some(lower) => values.iter().filter(|&&v| v < lower).count(),
        None => 0,
    };
    let above = match limit.upper {
        Some(upper) => values.iter().filter(|&&v| v > upper).count(),
        None => 0,
    };
    let total = values.len();
    let valid_values: Vec<f64> = values
        .iter()
        .filter(|&&v| limit.lower.map_or(true, |l| v >= l) && limit.upper.map_or(true, |u| v <= u))
        .cloned()
        .collect();
    let valid = valid_values.len();

    let yield_rate = if total == 0 {
        "N/A".to_string()
    } else {
        format!("{:.2}%", valid as f64 / total as f64 * 100.0)
    };

    SiftReportRow {
        file_index,
        file_name,
        feature,
        total,
        valid,
        below,
        above,
        yield_rate,
        mean: stats::mean(&valid_values).unwrap_or(0.0),
        std_dev: stats::sample_std(&valid_values).unwrap_or(0.0),
        lower: limit.lower,
        upper: limit.upper,
    }
}
