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

//! # Sift Table Module
//!
//! This module provides the core tabular data structures for Sift. One
//! `SiftTable` is produced per input file by the loader and is read-only
//! thereafter; every downstream component (classifier, limit calculator,
//! recommender, reporter) consumes tables without mutating them.
//!
//! ## Design Principles
//!
//! - **Column-major**: a table is an ordered collection of named columns,
//!   each an ordered sequence of cells, with a row count consistent across
//!   columns. Features are analyzed independently, so columnar access is
//!   the hot path.
//! - **Loose typing per cell**: measurement exports routinely mix numeric
//!   readings with textual flags, so each cell is `Numeric`, `Text`, or
//!   `Null` and numeric extraction simply drops the rest.
//! - **Immutability-friendly**: tables are created once at load time;
//!   there is no mutation API.
//!
//! ## Usage Example
//!
//! ```rust
//! use siftx::table::{SiftTable, SiftValue};
//!
//! let table = SiftTable::from_columns(
//!     vec!["X".to_string(), "Flag".to_string()],
//!     vec![
//!         vec![SiftValue::Numeric(1.5), SiftValue::Numeric(2.5), SiftValue::Null],
//!         vec![SiftValue::Text("ok".into()), SiftValue::Null, SiftValue::Text("ok".into())],
//!     ],
//! );
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.numeric_values("X"), vec![1.5, 2.5]);
//! assert!(table.numeric_values("Flag").is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// The loader performs type inference per cell: a trimmed empty field
/// becomes `Null`, a field that parses as `f64` becomes `Numeric`, and
/// anything else is kept as `Text`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SiftValue {
    /// A parsed floating-point measurement.
    Numeric(f64),
    /// A non-numeric field kept verbatim.
    Text(String),
    /// A missing field.
    Null,
}

impl SiftValue {
    /// Parses one raw delimited field into a typed cell.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SiftValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => SiftValue::Numeric(v),
            _ => SiftValue::Text(trimmed.to_string()),
        }
    }

    /// The numeric content of this cell, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SiftValue::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

/// One named column of cells.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SiftColumn {
    pub name: String,
    pub values: Vec<SiftValue>,
}

/// An immutable tabular structure: ordered named columns with a row count
/// consistent across columns. Produced once per input file by the loader.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SiftTable {
    columns: Vec<SiftColumn>,
    row_count: usize,
}

impl SiftTable {
    /// An empty table: the defined sentinel for "no data from this file".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from column names and column-major cells. Columns
    /// shorter than the longest are padded with `Null` so that the row
    /// count is consistent.
    pub fn from_columns(names: Vec<String>, mut columns: Vec<Vec<SiftValue>>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(row_count, SiftValue::Null);
        }
        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| SiftColumn { name, values })
            .collect();
        Self { columns, row_count }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether this table carries no data at all.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether a feature (column) exists in this table, by exact name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// The column with the given name, if present.
    pub fn column(&self, name: &str) -> Option<&SiftColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All numeric values of a feature in row order, with `Null` and
    /// textual cells dropped. Empty when the column is absent.
    pub fn numeric_values(&self, name: &str) -> Vec<f64> {
        self.column(name)
            .map(|c| c.values.iter().filter_map(SiftValue::as_f64).collect())
            .unwrap_or_default()
    }
}
