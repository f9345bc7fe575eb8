// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confluence tool server.
//!
//! Answers one tool call per process: `search`, `getPageContent` or
//! `listTools`. The result is printed as JSON between the
//! `---JSON_START---` / `---JSON_END---` sentinels so callers can pick it
//! out of any surrounding output.

pub mod client;
pub mod server;

pub use client::{ConfluenceClient, ConfluenceCredentials, excerpt, strip_html};
pub use server::{ToolServer, parse_params, render_output, tool_catalog};
