// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Helpline support assistant.
//!
//! This crate provides the error type, the request/response types shared by
//! the support pipeline, and the provider trait that LLM adapters implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::HelplineError;
pub use types::{
    AdapterType, GenerationRequest, GenerationResponse, HealthStatus, Query, RequestContext,
    StreamChunk, TokenUsage,
};

pub use traits::{ChunkStream, PluginAdapter, ProviderAdapter};
