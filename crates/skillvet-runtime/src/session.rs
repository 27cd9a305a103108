//! The review session: one conversation between the model and the file
//! tools, run as a background task that reports progress over a channel.
//!
//! The orchestrator never sees the conversation itself — only the
//! [`SessionEvent`] stream and the final report. The tool loop (model turn,
//! tool execution, result fed back) lives entirely inside the task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use skillvet_core::{Message, Result, Role, SessionEvent, ToolExecutor, ToolResult, VetError};
use skillvet_llm::{LlmProvider, LlmRequest};

/// Knobs for a single review session, taken from `[agent]` config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on model turns before the session fails.
    pub max_iterations: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 8192,
            temperature: 0.2,
            max_iterations: 40,
        }
    }
}

/// Handle to a running session. Dropping it aborts the task.
pub struct SessionHandle {
    pub events: mpsc::Receiver<SessionEvent>,
    task: JoinHandle<()>,
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct ReviewSession;

impl ReviewSession {
    /// Spawn a session driving `prompt` against `provider` with `tools`.
    /// Returns immediately; progress arrives on the handle's event channel.
    pub fn spawn(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<dyn ToolExecutor>,
        system: String,
        prompt: String,
        options: SessionOptions,
    ) -> SessionHandle {
        let (tx, rx) = mpsc::channel(64);
        let task = tokio::spawn(async move {
            let outcome = run_loop(provider, tools, system, prompt, options, &tx).await;
            let terminal = match outcome {
                Ok(report) => SessionEvent::Completed { report },
                Err(e) => SessionEvent::Failed {
                    error: e.to_string(),
                },
            };
            // Receiver may be gone if the handle was dropped.
            let _ = tx.send(terminal).await;
        });
        SessionHandle { events: rx, task }
    }
}

async fn run_loop(
    provider: Arc<dyn LlmProvider>,
    tools: Arc<dyn ToolExecutor>,
    system: String,
    prompt: String,
    options: SessionOptions,
    events: &mpsc::Sender<SessionEvent>,
) -> Result<String> {
    let tool_defs = tools.tools();
    let mut messages = vec![Message::text(Role::User, prompt)];

    for iteration in 0..options.max_iterations {
        debug!(iteration, "requesting completion");
        let request = LlmRequest {
            model: options.model.clone(),
            messages: messages.clone(),
            tools: tool_defs.clone(),
            system: Some(system.clone()),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };
        let response = provider.complete(&request).await?;

        if !response.has_tool_calls {
            return Ok(response.message.text_content());
        }

        let calls = response.message.tool_calls.clone();
        messages.push(response.message);

        for call in calls {
            let _ = events
                .send(SessionEvent::ToolCallStarted {
                    name: call.tool_name.clone(),
                    arguments: call.arguments.clone(),
                })
                .await;

            // A handler error (bad arguments, unknown tool) goes back to the
            // model as an error result rather than killing the session.
            let result = match tools.execute(&call).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(tool = %call.tool_name, error = %e, "tool execution failed");
                    ToolResult::error(call.id.clone(), e.to_string())
                }
            };

            let _ = events
                .send(SessionEvent::ToolCallFinished {
                    name: call.tool_name.clone(),
                    is_error: result.is_error,
                })
                .await;

            messages.push(Message::tool_result(result));
        }
    }

    Err(VetError::Session(format!(
        "session exceeded {} iterations without completing",
        options.max_iterations
    )))
}

/// Drain a session's events, logging tool activity, until the terminal
/// event arrives. `timeout_secs == 0` means no deadline.
///
/// Tool diagnostics go through `tracing` (stderr); the report itself is
/// returned to the caller untouched.
pub async fn collect_report(handle: SessionHandle, timeout_secs: u64) -> Result<String> {
    let drain = drain_events(handle);
    if timeout_secs == 0 {
        return drain.await;
    }
    match tokio::time::timeout(Duration::from_secs(timeout_secs), drain).await {
        Ok(outcome) => outcome,
        Err(_) => Err(VetError::SessionTimeout { timeout_secs }),
    }
}

async fn drain_events(mut handle: SessionHandle) -> Result<String> {
    while let Some(event) = handle.events.recv().await {
        match event {
            SessionEvent::ToolCallStarted { name, arguments } => {
                info!(tool = %name, arguments = %arguments, "tool call");
            }
            SessionEvent::ToolCallFinished { name, is_error } => {
                info!(tool = %name, is_error, "tool returned");
            }
            SessionEvent::Completed { report } => return Ok(report),
            SessionEvent::Failed { error } => return Err(VetError::Session(error)),
        }
    }
    // Channel closed with no terminal event: the task panicked or was aborted.
    Err(VetError::Session(
        "session ended without a terminal event".into(),
    ))
}
