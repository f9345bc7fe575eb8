// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool invocation and context orchestration.
//!
//! A tool server is an external executable launched once per call as
//! `<command> <args...> <tool> --params '<json>'`. It prints a JSON payload
//! between `---JSON_START---` and `---JSON_END---` on stdout.
//!
//! - [`extract`]: pulls the JSON payload out of raw stdout.
//! - [`protocol`]: [`ToolInvoker`] and the process-backed [`ProcessInvoker`].
//! - [`orchestrator`]: search, then fetch the top hit, then build a context string.

pub mod extract;
pub mod orchestrator;
pub mod protocol;
pub mod result;

pub use extract::{Extraction, JSON_END, JSON_START, extract_json};
pub use orchestrator::{ContextStatus, ToolContext, ToolOrchestrator};
pub use protocol::{ProcessInvoker, ToolInvoker, build_argv};
pub use result::{SearchResult, ToolDescriptor, ToolInvocationResult};
