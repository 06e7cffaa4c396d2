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

//! # Sift Error Module
//!
//! This module defines the error types and utilities used throughout the
//! Sift engine for consistent error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! Sift distinguishes three severities, and the variants encode them:
//!
//! - **Per-file failures** (`Header`, `Parse`): a single input file could
//!   not be ingested. The session recovers by recording an empty table and
//!   continuing with the remaining files.
//! - **Caller errors** (`Validation`): unsupported method names, empty
//!   selections, or malformed override parameters. Rejected before any
//!   computation runs.
//! - **Unexpected failures** (`Io`, `Serde`, `Internal`): surfaced as-is.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Sift.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Canonical error enumeration for Sift.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum SiftError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Header auto-detection failed: no line among the scanned prefix of
    /// the file contained the marker character. Fatal for that file; the
    /// caller decides whether to abort or skip.
    #[error("header not found in '{path}': no line among the first {scanned} contains '{marker}'")]
    Header {
        path: String,
        marker: char,
        scanned: usize,
    },

    /// A file body could not be parsed under any delimiter candidate.
    #[error("parse error in '{path}': {message}")]
    Parse { path: String, message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for SiftError {
    fn from(err: io::Error) -> Self {
        SiftError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        SiftError::Serde(err.to_string())
    }
}

impl SiftError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        SiftError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct per-file parse errors.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        SiftError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        SiftError::Internal(message.into())
    }

    /// Whether this error is recoverable at the file granularity: the
    /// session maps such failures to an empty table and continues.
    pub fn is_per_file(&self) -> bool {
        matches!(self, SiftError::Header { .. } | SiftError::Parse { .. })
    }
}
