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

use siftx::report::{AGGREGATE_INDEX, AGGREGATE_NAME, REPORT_COLUMNS};
use siftx::{SiftLimit, SiftLimitMap, SiftTable, SiftValue, SiftYieldReporter};

fn numeric_table(feature: &str, values: &[f64]) -> SiftTable {
    let column = values.iter().map(|&v| SiftValue::Numeric(v)).collect();
    SiftTable::from_columns(vec![feature.to_string()], vec![column])
}

#[test]
fn report_schema_has_twelve_fixed_columns() {
    assert_eq!(REPORT_COLUMNS.len(), 12);
    assert_eq!(REPORT_COLUMNS[0], "File Index");
    assert_eq!(REPORT_COLUMNS[7], "Yield");
    assert_eq!(REPORT_COLUMNS[11], "Upper Limit");
}

#[test]
fn aggregate_counts_equal_the_sum_of_per_file_counts() {
    let mut rng = SmallRng::seed_from_u64(7);
    let tables: Vec<(String, SiftTable)> = (0..4)
        .map(|i| {
            let values: Vec<f64> = (0..250).map(|_| rng.gen_range(0.0..100.0)).collect();
            (format!("file_{}.csv", i), numeric_table("X", &values))
        })
        .collect();
    let views: Vec<(&str, &SiftTable)> =
        tables.iter().map(|(n, t)| (n.as_str(), t)).collect();

    let mut limits = SiftLimitMap::new();
    limits.insert("X".to_string(), SiftLimit::new(25.0, 75.0, "manual"));

    let reporter = SiftYieldReporter::new();
    let rows = reporter.report(&["X".to_string()], &views, &limits);
    assert_eq!(rows.len(), 5);

    let aggregate = rows.last().expect("aggregate row");
    assert_eq!(aggregate.file_index, AGGREGATE_INDEX);
    assert_eq!(aggregate.file_name, AGGREGATE_NAME);

    let per_file = &rows[..4];
    assert_eq!(
        aggregate.total,
        per_file.iter().map(|r| r.total).sum::<usize>()
    );
    assert_eq!(
        aggregate.valid,
        per_file.iter().map(|r| r.valid).sum::<usize>()
    );
    assert_eq!(
        aggregate.below,
        per_file.iter().map(|r| r.below).sum::<usize>()
    );
    assert_eq!(
        aggregate.above,
        per_file.iter().map(|r| r.above).sum::<usize>()
    );
}

#[test]
fn file_indices_are_one_based_and_stable() {
    let a = numeric_table("X", &[1.0]);
    let b = numeric_table("X", &[2.0]);
    let c = numeric_table("X", &[3.0]);
    let views = vec![("a", &a), ("b", &b), ("c", &c)];

    let reporter = SiftYieldReporter::new();
    let rows = reporter.report(&["X".to_string()], &views, &SiftLimitMap::new());
    assert_eq!(rows[0].file_index, "1");
    assert_eq!(rows[1].file_index, "2");
    assert_eq!(rows[2].file_index, "3");
}

#[test]
fn empty_file_reports_na_yield() {
    let empty = numeric_table("X", &[]);
    let full = numeric_table("X", &[5.0, 6.0]);
    let views = vec![("empty", &empty), ("full", &full)];

    let mut limits = SiftLimitMap::new();
    limits.insert("X".to_string(), SiftLimit::new(0.0, 10.0, "manual"));

    let reporter = SiftYieldReporter::new();
    let rows = reporter.report(&["X".to_string()], &views, &limits);

    assert_eq!(rows[0].yield_rate, "N/A");
    assert_eq!(rows[1].yield_rate, "100.00%");
    // The aggregate still sees the non-empty file's data.
    assert_eq!(rows.last().expect("aggregate").total, 2);
}

#[test]
fn rows_serialize_to_json() {
    let table = numeric_table("X", &[1.0, 2.0]);
    let views = vec![("a", &table)];
    let reporter = SiftYieldReporter::new();
    let rows = reporter.report(&["X".to_string()], &views, &SiftLimitMap::new());

    let json = rows[0].as_json();
    assert_eq!(json["file_index"], serde_json::json!("1"));
    assert_eq!(json["total"], serde_json::json!(2));
    assert_eq!(json["lower"], serde_json::Value::Null);
}

#[test]
fn per_file_rows_group_by_file_before_aggregates() {
    let two_features = |x: f64, y: f64| {
        SiftTable::from_columns(
            vec!["X".to_string(), "Y".to_string()],
            vec![vec![SiftValue::Numeric(x)], vec![SiftValue::Numeric(y)]],
        )
    };
    let a = two_features(1.0, 10.0);
    let b = two_features(2.0, 20.0);
    let views = vec![("a", &a), ("b", &b)];
    let features = vec!["X".to_string(), "Y".to_string()];

    let reporter = SiftYieldReporter::new();
    let rows = reporter.report(&features, &views, &SiftLimitMap::new());

    // All of file 1's features, then file 2's, then the aggregates.
    assert_eq!(rows.len(), 6);
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.file_index.as_str(), r.feature.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("1", "X"),
            ("1", "Y"),
            ("2", "X"),
            ("2", "Y"),
            (AGGREGATE_INDEX, "X"),
            (AGGREGATE_INDEX, "Y"),
        ]
    );
}
