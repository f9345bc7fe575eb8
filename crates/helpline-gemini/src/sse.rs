// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parsing for `streamGenerateContent?alt=sse`.
//!
//! Every event's `data` is a complete [`GenerateContentResponse`] fragment.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use helpline_core::HelplineError;

use crate::types::{ApiErrorResponse, GenerateContentResponse};

/// Boxed stream of decoded response fragments.
pub type ResponseStream =
    Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, HelplineError>> + Send>>;

/// Decodes a streaming HTTP response into response fragments.
pub fn parse_sse_stream(response: reqwest::Response) -> ResponseStream {
    parse_event_bytes(response.bytes_stream())
}

/// Decodes any SSE byte stream. Split from [`parse_sse_stream`] so the
/// framing can be exercised without a socket.
pub fn parse_event_bytes<S, B, E>(bytes: S) -> ResponseStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: std::fmt::Display + Send + 'static,
{
    let mapped = bytes.eventsource().filter_map(|result| async move {
        match result {
            Ok(event) => {
                let data = event.data.trim();
                if data.is_empty() || data == "[DONE]" {
                    return None;
                }
                Some(decode_fragment(data))
            }
            Err(e) => Some(Err(HelplineError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });
    Box::pin(mapped)
}

fn decode_fragment(data: &str) -> Result<GenerateContentResponse, HelplineError> {
    // Errors raised mid-stream arrive as an error envelope instead of a fragment.
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(data) {
        return Err(HelplineError::Provider {
            message: format!(
                "Gemini API error ({}): {}",
                api_err.error.status, api_err.error.message
            ),
            source: None,
        });
    }
    serde_json::from_str(data).map_err(|e| HelplineError::Provider {
        message: format!("failed to parse stream fragment: {e}"),
        source: Some(Box::new(e)),
    })
}
