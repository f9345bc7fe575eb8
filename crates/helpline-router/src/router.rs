// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model selection from complexity tier.
//!
//! Priority: `routing.force_model` > routing disabled (provider default) > classification.

use helpline_config::model::{RoutingConfig, default_simple_model};
use tracing::debug;

use crate::classifier::{Complexity, QueryClassifier};

/// Model for `complexity` under the default routing table.
///
/// `Simple` maps to `"gemini-1.5-flash"`, `Complex` to `"gemini-pro"`.
pub fn select_model(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Simple => "gemini-1.5-flash",
        Complexity::Complex => "gemini-pro",
    }
}

/// Outcome of routing one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Classified tier. Still computed when the model is forced.
    pub complexity: Complexity,
    /// Model identifier to send to the provider.
    pub model: String,
    /// Human-readable reason for the choice.
    pub reason: String,
}

/// Routes queries to models using a [`RoutingConfig`].
pub struct ModelRouter {
    classifier: QueryClassifier,
    config: RoutingConfig,
    fallback_model: String,
}

impl ModelRouter {
    /// `fallback_model` is used when routing is disabled.
    pub fn new(config: RoutingConfig, fallback_model: impl Into<String>) -> Self {
        Self {
            classifier: QueryClassifier::new(),
            config,
            fallback_model: fallback_model.into(),
        }
    }

    /// Router with the stock `gemini-1.5-flash` / `gemini-pro` table.
    pub fn with_defaults() -> Self {
        Self::new(RoutingConfig::default(), default_simple_model())
    }

    /// Model configured for a tier.
    pub fn model_for(&self, complexity: Complexity) -> &str {
        match complexity {
            Complexity::Simple => &self.config.simple_model,
            Complexity::Complex => &self.config.complex_model,
        }
    }

    /// Classifies `text` and picks a model.
    pub fn route(&self, text: &str) -> RoutingDecision {
        let classification = self.classifier.classify(text);
        let complexity = classification.complexity;

        let (model, reason) = if let Some(forced) = &self.config.force_model {
            (forced.clone(), "routing.force_model".to_string())
        } else if !self.config.enabled {
            (self.fallback_model.clone(), "routing disabled".to_string())
        } else {
            let reason = match classification.keyword {
                Some(keyword) => format!("matched keyword `{keyword}`"),
                None => "no complexity keywords".to_string(),
            };
            (self.model_for(complexity).to_string(), reason)
        };

        debug!(%complexity, model = model.as_str(), reason = reason.as_str(), "query routed");

        RoutingDecision {
            complexity,
            model,
            reason,
        }
    }
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
