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

//! # Analysis Module
//!
//! The statistical core: descriptive statistics and normality testing
//! ([`stats`]), distribution shape classification ([`classify`]), direct
//! limit computation under a caller-chosen method ([`limits`]), and
//! shape-driven adaptive recommendation ([`recommend`]).

pub mod classify;
pub mod limits;
pub mod recommend;
pub mod stats;

pub use classify::{SiftDistributionClassifier, SiftDistributionLabel, SiftDistributionProfile};
pub use limits::{SiftLimitCalculator, SiftLimitMethod};
pub use recommend::{SiftAdaptiveRecommender, SiftRecommendation, SiftRecommendedMethod};
