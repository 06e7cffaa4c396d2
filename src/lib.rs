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

//! # Sift Core Library
//!
//! Sift is an adaptive acceptance-limit and yield engine for tabular
//! measurement data. It ingests delimited measurement files (one row per
//! manufactured unit, one column per measured feature), classifies each
//! feature's empirical distribution, recommends per-feature acceptance
//! limits adapted to that shape, and aggregates per-file and cross-file
//! pass/fail statistics into a tabular yield report.
//!
//! ## Module Overview
//!
//! - **errors**: SiftError taxonomy and the library-wide Result alias
//! - **table**: column-major typed tables and per-cell type inference
//! - **config**: header modes, strictness tiers, parameter overrides
//! - **ingest**: delimited-file loading with header auto-detection and
//!   delimiter reconciliation
//! - **analyze**: descriptive statistics, distribution classification,
//!   limit computation, adaptive recommendation
//! - **report**: limit maps and yield report rows
//! - **session**: the single-caller driver over the whole pipeline
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use siftx::{SiftSession, SiftSessionConfig};
//!
//! let mut session = SiftSession::new(SiftSessionConfig::default());
//! session.load_files(&[PathBuf::from("batch_a.csv")]).unwrap();
//!
//! let features = vec!["diameter".to_string()];
//! session.recommend_for_features(&features).unwrap();
//! let rows = session.generate_report(&features).unwrap();
//! for row in &rows {
//!     println!("{} / {}: {}", row.file_name, row.feature, row.yield_rate);
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, SiftError>`. Per-file and
//! per-feature failures inside batch operations are logged and skipped;
//! caller-level input errors are surfaced immediately.

pub mod errors;

pub mod analyze;
pub mod config;
pub mod ingest;
pub mod report;
pub mod session;
pub mod table;

pub use errors::{Result, SiftError};
pub use table::{SiftColumn, SiftTable, SiftValue};
pub use config::{
    SiftFeatureOverride, SiftHeaderMode, SiftLimitParams, SiftSessionConfig, SiftStrictness,
};
pub use ingest::{SiftLoaderConfig, SiftTableLoader};
pub use analyze::{
    SiftAdaptiveRecommender, SiftDistributionClassifier, SiftDistributionLabel,
    SiftDistributionProfile, SiftLimitCalculator, SiftLimitMethod, SiftRecommendation,
    SiftRecommendedMethod,
};
pub use report::{SiftLimit, SiftLimitMap, SiftReportRow, SiftYieldReporter};
pub use session::{
    SiftLoadedFile, SiftPhase, SiftProgress, SiftProgressCallback, SiftSession,
};
