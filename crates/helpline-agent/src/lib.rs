// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support request handling.
//!
//! [`SupportHandler`] ties routing, document context, and generation together
//! for one customer query at a time.

pub mod handler;
pub mod prompt;

pub use handler::{PROVIDER_ID, SupportHandler, SupportResponse};
pub use prompt::build_prompt;
