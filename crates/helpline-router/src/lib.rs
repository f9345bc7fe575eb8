// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query complexity classification and model routing.
//!
//! - [`classify`] / [`QueryClassifier`]: keyword heuristic, no I/O.
//! - [`select_model`] / [`ModelRouter`]: complexity tier to model identifier.

pub mod classifier;
pub mod router;

pub use classifier::{COMPLEX_KEYWORDS, ClassificationResult, Complexity, QueryClassifier, classify};
pub use router::{ModelRouter, RoutingDecision, select_model};
