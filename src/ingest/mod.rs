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

//! # Data Ingestion Module
//!
//! This module parses loosely-structured delimited measurement files into
//! [`SiftTable`](crate::table::SiftTable)s.
//!
//! ## Module Components
//!
//! - **Loader** ([loader.rs](loader/index.html)): header location (marker
//!   scan or fixed row), delimiter reconciliation, and typed table
//!   construction
//!
//! ## Ingestion Behavior
//!
//! Measurement exports rarely put the header on the first line, and the
//! delimiter of the header row does not always match the body. The loader
//! therefore:
//!
//! - locates the header by scanning for a marker character (auto-detect)
//!   or at a fixed row index (manual),
//! - retries header and body under each candidate delimiter when their
//!   column counts disagree,
//! - synthesizes positional `Column_N` names when no candidate agrees,
//! - returns an empty table instead of failing on unparseable input, so a
//!   multi-file run continues over the remaining files.

pub mod loader;

pub use loader::{SiftLoaderConfig, SiftTableLoader, DELIMITER_CANDIDATES, MAX_HEADER_SCAN_LINES};
