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

use std::path::Path;

use crate::config::SiftHeaderMode;
use crate::errors::{Result, SiftError};
use crate::table::{SiftTable, SiftValue};

/// Maximum number of raw lines scanned for the header marker.
pub const MAX_HEADER_SCAN_LINES: usize = 100;

/// Delimiter candidates tried, in order, when header and body column
/// counts disagree. The first candidate is also the default delimiter.
pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b' '];

/// Loader tuning knobs.
#[derive(Clone, Debug)]
pub struct SiftLoaderConfig {
    /// Lines scanned for the marker in auto-detect mode.
    pub max_scan_lines: usize,
    /// Default delimiter for the initial header/body parse.
    pub default_delimiter: u8,
}

impl Default for SiftLoaderConfig {
    fn default() -> Self {
        Self {
            max_scan_lines: MAX_HEADER_SCAN_LINES,
            default_delimiter: DELIMITER_CANDIDATES[0],
        }
    }
}

/// Parses a delimited text file into a typed [`SiftTable`].
///
/// The only error this loader raises is [`SiftError::Header`] (marker not
/// found in auto-detect mode): that failure is fatal for the file and the
/// caller decides whether to abort or skip. Every other problem degrades
/// to an empty table so a multi-file run continues.
#[derive(Clone, Debug, Default)]
pub struct SiftTableLoader {
    config: SiftLoaderConfig,
}

impl SiftTableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SiftLoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads one file under the given header mode.
    pub fn load(&self, path: &Path, mode: &SiftHeaderMode) -> Result<SiftTable> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::error!("failed to read '{}': {}", path.display(), e);
                return Ok(SiftTable::empty());
            }
        };
        let lines: Vec<&str> = content.lines().collect();

        let header_row = match *mode {
            SiftHeaderMode::AutoDetect { marker } => self.find_header_row(&lines, marker, path)?,
            SiftHeaderMode::Manual { header_row } => header_row,
        };

        if header_row >= lines.len() {
            log::warn!(
                "header row {} is past the end of '{}' ({} lines)",
                header_row,
                path.display(),
                lines.len()
            );
            return Ok(SiftTable::empty());
        }

        let header_line = lines[header_row];
        let body_lines = &lines[header_row + 1..];

        // Initial parse under the default delimiter. A failure here is
        // unrecoverable for this file.
        let delimiter = self.config.default_delimiter;
        let mut names = match parse_single_line(header_line, delimiter) {
            Some(fields) => fields,
            None => {
                let err = SiftError::parse(path.display().to_string(), "unparseable header line");
                log::error!("{}", err);
                return Ok(SiftTable::empty());
            }
        };
        let mut body = match parse_body(body_lines, delimiter) {
            Some(records) => records,
            None => {
                let err = SiftError::parse(path.display().to_string(), "unparseable data body");
                log::error!("{}", err);
                return Ok(SiftTable::empty());
            }
        };

        if body.is_empty() {
            log::debug!("'{}' carries a header but no data rows", path.display());
            let empty_columns = vec![Vec::new(); names.len()];
            return Ok(SiftTable::from_columns(names, empty_columns));
        }

        // Column-count reconciliation: retry header and body under each
        // candidate delimiter, keeping the first that makes them agree.
        if names.len() != body_column_count(&body) {
            log::warn!(
                "column mismatch in '{}': header has {}, body has {}; retrying delimiters",
                path.display(),
                names.len(),
                body_column_count(&body)
            );
            let mut reconciled = false;
            for &candidate in DELIMITER_CANDIDATES.iter() {
                let candidate_names = match parse_single_line(header_line, candidate) {
                    Some(fields) => fields,
                    None => continue,
                };
                let candidate_body = match parse_body(body_lines, candidate) {
                    Some(records) if !records.is_empty() => records,
                    _ => continue,
                };
                let agrees = candidate_names.len() == body_column_count(&candidate_body);
                // Keep the last body that parsed at all: if nothing
                // reconciles, positional names are synthesized over it.
                names = candidate_names;
                body = candidate_body;
                if agrees {
                    log::info!(
                        "reconciled '{}' with delimiter {:?}",
                        path.display(),
                        candidate as char
                    );
                    reconciled = true;
                    break;
                }
            }

            if !reconciled {
                let width = body_column_count(&body);
                log::warn!(
                    "no delimiter reconciles '{}'; synthesizing {} positional column names",
                    path.display(),
                    width
                );
                names = (0..width).map(|i| format!("Column_{}", i)).collect();
            }
        }

        Ok(build_table(names, &body))
    }

    fn find_header_row(&self, lines: &[&str], marker: char, path: &Path) -> Result<usize> {
        let scanned = lines.len().min(self.config.max_scan_lines);
        for (i, line) in lines.iter().take(scanned).enumerate() {
            if line.contains(marker) {
                log::debug!("header marker '{}' found at line {}", marker, i);
                return Ok(i);
            }
        }
        Err(SiftError::Header {
            path: path.display().to_string(),
            marker,
            scanned: self.config.max_scan_lines,
        })
    }
}

/// Parses one raw line as a single delimited record without type
/// inference, trimming surrounding whitespace from each field. `None`
/// when the line cannot be parsed under this delimiter.
fn parse_single_line(line: &str, delimiter: u8) -> Option<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Some(record.iter().map(|f| f.trim().to_string()).collect()),
        _ => None,
    }
}

/// Parses the data body line by line. Lines that fail to parse under the
/// delimiter are swallowed; `None` only when the body as a whole cannot
/// be read.
fn parse_body(lines: &[&str], delimiter: u8) -> Option<Vec<Vec<String>>> {
    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(joined.as_bytes());

    let mut records = Vec::with_capacity(lines.len());
    for result in reader.records() {
        match result {
            Ok(record) => {
                if record.iter().all(|f| f.trim().is_empty()) {
                    continue;
                }
                records.push(record.iter().map(|f| f.to_string()).collect());
            }
            Err(e) => {
                log::debug!("swallowing body parse error: {}", e);
                return None;
            }
        }
    }
    Some(records)
}

/// The body's column count: the width of its first record.
fn body_column_count(body: &[Vec<String>]) -> usize {
    body.first().map(Vec::len).unwrap_or(0)
}

/// Assembles a column-major typed table. Rows wider than the header are
/// truncated; narrower rows are padded with nulls.
fn build_table(names: Vec<String>, body: &[Vec<String>]) -> SiftTable {
    let width = names.len();
    let mut columns: Vec<Vec<SiftValue>> = vec![Vec::with_capacity(body.len()); width];
    for row in body {
        for (i, column) in columns.iter_mut().enumerate() {
            match row.get(i) {
                Some(raw) => column.push(SiftValue::parse(raw)),
                None => column.push(SiftValue::Null),
            }
        }
    }
    SiftTable::from_columns(names, columns)
}
