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

//! # Session Module
//!
//! The single-caller driver tying the pipeline together: load all files
//! once, then repeatedly classify, compute or recommend limits, adjust
//! the limit map, and generate reports. Tables are read-only after
//! loading; the limit map is the one mutable artifact.
//!
//! Per-file and per-feature failures are logged and skipped so a batch
//! run continues; only caller-level input errors (no files, no
//! features, a bad method name) abort an operation.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::analyze::classify::{SiftDistributionClassifier, SiftDistributionProfile};
use crate::analyze::limits::{SiftLimitCalculator, SiftLimitMethod};
use crate::analyze::recommend::{SiftAdaptiveRecommender, SiftRecommendation};
use crate::config::{SiftLimitParams, SiftSessionConfig};
use crate::errors::{Result, SiftError};
use crate::ingest::loader::SiftTableLoader;
use crate::report::{SiftLimit, SiftLimitMap, SiftReportRow, SiftYieldReporter};
use crate::table::SiftTable;

pub type SiftProgressCallback = Box<dyn Fn(SiftProgress) + Send + Sync>;

/// The long-running session phases that report progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiftPhase {
    Loading,
    Recommending,
    Reporting,
}

/// Coarse progress for one long-running step. Not cancellable; a caller
/// wanting cancellation wraps the session, not the core.
#[derive(Clone, Debug)]
pub struct SiftProgress {
    pub phase: SiftPhase,
    pub completed: usize,
    pub total: usize,
    pub current: String,
}

/// One loaded input file. The table may be empty when the file failed to
/// load; it still occupies its slot so file indices stay stable.
#[derive(Clone, Debug)]
pub struct SiftLoadedFile {
    pub name: String,
    pub path: PathBuf,
    pub table: SiftTable,
}

/// The analysis session.
pub struct SiftSession {
    config: SiftSessionConfig,
    loader: SiftTableLoader,
    classifier: SiftDistributionClassifier,
    calculator: SiftLimitCalculator,
    recommender: SiftAdaptiveRecommender,
    reporter: SiftYieldReporter,
    files: Vec<SiftLoadedFile>,
    limits: SiftLimitMap,
    progress_callback: Option<SiftProgressCallback>,
}

impl SiftSession {
    pub fn new(config: SiftSessionConfig) -> Self {
        Self {
            config,
            loader: SiftTableLoader::new(),
            classifier: SiftDistributionClassifier::new(),
            calculator: SiftLimitCalculator::new(),
            recommender: SiftAdaptiveRecommender::new(),
            reporter: SiftYieldReporter::new(),
            files: Vec::new(),
            limits: SiftLimitMap::new(),
            progress_callback: None,
        }
    }

    pub fn with_progress(mut self, callback: SiftProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn files(&self) -> &[SiftLoadedFile] {
        &self.files
    }

    pub fn limits(&self) -> &SiftLimitMap {
        &self.limits
    }

    /// Loads every input file once, replacing any previously loaded set.
    ///
    /// A file whose header marker is not found, or that fails to parse,
    /// is logged and kept as an empty table so the rest of the run
    /// proceeds. An empty path list is a caller error.
    pub fn load_files(&mut self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Err(SiftError::validation("no input files selected"));
        }

        self.files.clear();
        for (i, path) in paths.iter().enumerate() {
            self.report_progress(SiftPhase::Loading, i, paths.len(), path.display());
            let table = match self.loader.load(path, &self.config.header_mode) {
                Ok(table) => table,
                Err(e) if e.is_per_file() => {
                    log::warn!("skipping '{}': {}", path.display(), e);
                    SiftTable::empty()
                }
                Err(e) => return Err(e),
            };
            self.files.push(SiftLoadedFile {
                name: file_label(path),
                path: path.clone(),
                table,
            });
        }
        self.report_progress(SiftPhase::Loading, paths.len(), paths.len(), "");
        Ok(())
    }

    /// All numeric values of `feature` across every loaded table.
    pub fn combined_values(&self, feature: &str) -> Vec<f64> {
        self.files
            .iter()
            .flat_map(|f| f.table.numeric_values(feature))
            .collect()
    }

    /// Classifies `feature` over the combined values. Computed fresh on
    /// every call.
    pub fn classify(&self, feature: &str) -> SiftDistributionProfile {
        self.classifier.classify(&self.combined_values(feature))
    }

    /// Computes limits for one feature under an explicit method and
    /// parameter bundle, recording the result in the limit map.
    pub fn calculate_limits(
        &mut self,
        feature: &str,
        method: SiftLimitMethod,
        params: &SiftLimitParams,
    ) -> Result<(f64, f64)> {
        let values = self.combined_values(feature);
        let (lower, upper) = self.calculator.compute(&values, method, params)?;
        self.limits
            .insert(feature.to_string(), SiftLimit::new(lower, upper, method.to_string()));
        Ok((lower, upper))
    }

    /// Batch limit computation. Each feature's method and parameters are
    /// resolved from the per-feature overrides, defaulting to `3sigma`;
    /// a bad method name aborts, a data-less feature is skipped.
    pub fn calculate_limits_for_features(&mut self, features: &[String]) -> Result<()> {
        if features.is_empty() {
            return Err(SiftError::validation("no features selected"));
        }

        for feature in features {
            let (method, params) = self.resolve_override(feature)?;
            let values = self.combined_values(feature);
            if values.is_empty() {
                log::warn!("feature '{}' has no numeric data, skipping", feature);
                continue;
            }
            let (lower, upper) = self.calculator.compute(&values, method, &params)?;
            self.limits
                .insert(feature.clone(), SiftLimit::new(lower, upper, method.to_string()));
        }
        Ok(())
    }

    /// Adaptively recommends limits for one feature under the session's
    /// strictness tier, recording the result in the limit map.
    pub fn recommend(&mut self, feature: &str) -> Result<SiftRecommendation> {
        let values = self.combined_values(feature);
        let rec = self.recommender.recommend(&values, self.config.strictness)?;
        self.limits.insert(
            feature.to_string(),
            SiftLimit::new(rec.lower, rec.upper, rec.method.to_string()),
        );
        Ok(rec)
    }

    /// Batch recommendation with progress reporting. Features without
    /// numeric data are logged and skipped.
    pub fn recommend_for_features(&mut self, features: &[String]) -> Result<()> {
        if features.is_empty() {
            return Err(SiftError::validation("no features selected"));
        }

        for (i, feature) in features.iter().enumerate() {
            self.report_progress(SiftPhase::Recommending, i, features.len(), feature);
            let values = self.combined_values(feature);
            if values.is_empty() {
                log::warn!("feature '{}' has no numeric data, skipping", feature);
                continue;
            }
            let rec = self.recommender.recommend(&values, self.config.strictness)?;
            self.limits.insert(
                feature.clone(),
                SiftLimit::new(rec.lower, rec.upper, rec.method.to_string()),
            );
        }
        self.report_progress(SiftPhase::Recommending, features.len(), features.len(), "");
        Ok(())
    }

    /// Manual override: replaces (or sets) one feature's limit.
    pub fn set_limit(&mut self, feature: &str, limit: SiftLimit) {
        self.limits.insert(feature.to_string(), limit);
    }

    /// Generates the yield report for the selected features over every
    /// loaded table and the current limit map.
    pub fn generate_report(&self, features: &[String]) -> Result<Vec<SiftReportRow>> {
        if features.is_empty() {
            return Err(SiftError::validation("no features selected"));
        }
        self.report_progress(SiftPhase::Reporting, 0, features.len(), "");
        let tables: Vec<(&str, &SiftTable)> = self
            .files
            .iter()
            .map(|f| (f.name.as_str(), &f.table))
            .collect();
        let rows = self.reporter.report(features, &tables, &self.limits);
        self.report_progress(SiftPhase::Reporting, features.len(), features.len(), "");
        Ok(rows)
    }

    /// Resolves one feature's method and parameters from the configured
    /// overrides: explicit override, else the `3sigma` default.
    fn resolve_override(&self, feature: &str) -> Result<(SiftLimitMethod, SiftLimitParams)> {
        match self.config.overrides.get(feature) {
            Some(ov) => {
                let method = match ov.method.as_deref() {
                    Some(name) => SiftLimitMethod::from_str(name)?,
                    None => SiftLimitMethod::ThreeSigma,
                };
                Ok((method, ov.params))
            }
            None => Ok((SiftLimitMethod::ThreeSigma, SiftLimitParams::default())),
        }
    }

    fn report_progress(
        &self,
        phase: SiftPhase,
        completed: usize,
        total: usize,
        current: impl ToString,
    ) {
        if let Some(ref callback) = self.progress_callback {
            callback(SiftProgress {
                phase,
                completed,
                total,
                current: current.to_string(),
            });
        }
    }
}

/// Display label for one input file: its file name, or the full path
/// when the path has no final component.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
