// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Helpline integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock LLM provider with scripted streams
//! - [`ScriptedInvoker`] - Tool invoker replaying canned tool-server replies

pub mod mock_provider;
pub mod scripted_invoker;

pub use mock_provider::{MockProvider, MockReply};
pub use scripted_invoker::{InvocationCall, ScriptedInvoker};
