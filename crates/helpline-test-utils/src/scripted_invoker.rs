// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool invoker that replays scripted tool-server replies.

use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use helpline_core::HelplineError;
use helpline_tools::{ToolInvocationResult, ToolInvoker};

/// One recorded `invoke` call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationCall {
    pub server: String,
    pub tool: String,
    pub params: Value,
}

/// Replays replies in FIFO order.
///
/// Object replies decode the same way a real tool server's payload does;
/// any other JSON value decodes as an invalid response. Running out of
/// replies is an invocation error.
#[derive(Default)]
pub struct ScriptedInvoker {
    replies: Mutex<VecDeque<Result<Value, String>>>,
    calls: Mutex<Vec<InvocationCall>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a decoded payload.
    pub fn then_reply(mut self, payload: Value) -> Self {
        self.replies.get_mut().push_back(Ok(payload));
        self
    }

    /// Queue an invocation failure.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.replies.get_mut().push_back(Err(message.into()));
        self
    }

    /// Calls received so far, oldest first.
    pub async fn calls(&self) -> Vec<InvocationCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ToolInvoker for ScriptedInvoker {
    async fn invoke(
        &self,
        server_name: &str,
        tool_name: &str,
        params: &Value,
    ) -> Result<ToolInvocationResult, HelplineError> {
        self.calls.lock().await.push(InvocationCall {
            server: server_name.to_string(),
            tool: tool_name.to_string(),
            params: params.clone(),
        });

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(format!("no scripted reply for `{tool_name}`")));

        match reply {
            Ok(Value::Object(map)) => Ok(ToolInvocationResult::from_object(map)),
            Ok(_) => Ok(ToolInvocationResult::invalid_format()),
            Err(message) => Err(HelplineError::Invocation {
                message,
                source: None,
            }),
        }
    }
}
