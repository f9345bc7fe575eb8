// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based query complexity classification.
//!
//! A query is complex when its lowercased text contains any of
//! [`COMPLEX_KEYWORDS`] as a substring. Substring, not word, matching:
//! "failure" and "errors" count, and so does "debugging".

use strum::{Display, EnumString};

/// Substrings that mark a query as complex.
pub const COMPLEX_KEYWORDS: &[&str] = &[
    "fail",
    "crash",
    "error",
    "bug",
    "technical",
    "issue",
    "locked",
];

/// Query complexity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Complexity {
    Simple,
    Complex,
}

/// Result of classifying a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub complexity: Complexity,
    /// First keyword that matched, if any.
    pub keyword: Option<&'static str>,
}

/// Stateless keyword classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryClassifier;

impl QueryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `text`. Total: every input, including the empty string, has a tier.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let lower = text.to_lowercase();
        let keyword = COMPLEX_KEYWORDS
            .iter()
            .copied()
            .find(|k| lower.contains(k));

        ClassificationResult {
            complexity: if keyword.is_some() {
                Complexity::Complex
            } else {
                Complexity::Simple
            },
            keyword,
        }
    }
}

/// Shorthand for `QueryClassifier::new().classify(text).complexity`.
pub fn classify(text: &str) -> Complexity {
    QueryClassifier::new().classify(text).complexity
}
