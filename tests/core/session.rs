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

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::NamedTempFile;

use siftx::{SiftLimit, SiftSession, SiftSessionConfig};

/// Writes a measurement file: a marker-free preamble, then a comma
/// header, then 1000 grid values of feature `X` spanning `[0, 99.9]`.
fn write_grid_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp");
    writeln!(file, "Measurement Export").expect("write");
    writeln!(file, "Bench: line 3").expect("write");
    writeln!(file, "X,Unit").expect("write");
    for i in 0..1000 {
        writeln!(file, "{:.1},1", i as f64 * 0.1).expect("write");
    }
    file
}

#[test]
fn end_to_end_manual_limits_and_yield() {
    let file_a = write_grid_file();
    let file_b = write_grid_file();
    let paths = vec![
        PathBuf::from(file_a.path()),
        PathBuf::from(file_b.path()),
    ];

    let mut session = SiftSession::new(SiftSessionConfig::default());
    session.load_files(&paths).expect("load");
    assert_eq!(session.files().len(), 2);
    assert_eq!(session.combined_values("X").len(), 2000);

    session.set_limit("X", SiftLimit::new(10.0, 90.0, "manual"));
    let rows = session
        .generate_report(&["X".to_string()])
        .expect("report");

    // Two per-file rows plus the aggregate.
    assert_eq!(rows.len(), 3);

    // Grid values 10.0..=90.0 inclusive: indices 100..=900, 801 points.
    for row in &rows[..2] {
        assert_eq!(row.total, 1000);
        assert_eq!(row.valid, 801);
        assert_eq!(row.below, 100);
        assert_eq!(row.above, 99);
        assert_eq!(row.yield_rate, "80.10%");
    }

    let aggregate = rows.last().expect("aggregate");
    assert_eq!(aggregate.total, 2000);
    assert_eq!(aggregate.valid, 1602);
    assert_eq!(aggregate.yield_rate, "80.10%");
    assert_eq!(aggregate.lower, Some(10.0));
    assert_eq!(aggregate.upper, Some(90.0));
}

#[test]
fn recommendation_fills_the_limit_map() {
    let file = write_grid_file();
    let mut session = SiftSession::new(SiftSessionConfig::default());
    session
        .load_files(&[PathBuf::from(file.path())])
        .expect("load");

    session
        .recommend_for_features(&["X".to_string()])
        .expect("recommend");

    let limit = session.limits().get("X").expect("limit");
    // A value grid classifies as uniform, so the range method applies.
    assert_eq!(limit.method.as_deref(), Some("range"));
    assert!(limit.lower.expect("lower") <= 0.0);
    assert!(limit.upper.expect("upper") >= 99.9);
}

#[test]
fn classification_runs_over_the_combined_values() {
    let file_a = write_grid_file();
    let file_b = write_grid_file();
    let mut session = SiftSession::new(SiftSessionConfig::default());
    session
        .load_files(&[
            PathBuf::from(file_a.path()),
            PathBuf::from(file_b.path()),
        ])
        .expect("load");

    let profile = session.classify("X");
    assert_eq!(profile.label.to_string(), "uniform");
    assert!(!session.classify("MISSING").is_normal || session.combined_values("MISSING").is_empty());
}

#[test]
fn unloadable_file_keeps_its_slot_as_empty() {
    let good = write_grid_file();
    let mut bad = NamedTempFile::new().expect("tmp");
    writeln!(bad, "no marker anywhere").expect("write");
    writeln!(bad, "still none").expect("write");

    let mut session = SiftSession::new(SiftSessionConfig::default());
    session
        .load_files(&[PathBuf::from(bad.path()), PathBuf::from(good.path())])
        .expect("load");

    assert_eq!(session.files().len(), 2);
    assert!(session.files()[0].table.is_empty());
    assert_eq!(session.files()[1].table.row_count(), 1000);

    // File indices in the report stay aligned with load order.
    session.set_limit("X", SiftLimit::new(0.0, 100.0, "manual"));
    let rows = session.generate_report(&["X".to_string()]).expect("report");
    assert_eq!(rows[0].file_index, "2");
}

#[test]
fn progress_callbacks_fire_for_long_running_steps() {
    let file = write_grid_file();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let mut session = SiftSession::new(SiftSessionConfig::default()).with_progress(Box::new(
        move |progress| {
            assert!(progress.completed <= progress.total);
            seen.fetch_add(1, Ordering::SeqCst);
        },
    ));

    session
        .load_files(&[PathBuf::from(file.path())])
        .expect("load");
    session
        .recommend_for_features(&["X".to_string()])
        .expect("recommend");
    session.generate_report(&["X".to_string()]).expect("report");

    assert!(calls.load(Ordering::SeqCst) >= 6);
}
