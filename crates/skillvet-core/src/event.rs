use serde_json::Value;

/// Lifecycle events emitted by a review session.
///
/// A session emits zero or more `ToolCallStarted`/`ToolCallFinished` pairs
/// followed by exactly one terminal event.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The model requested a tool; the handler is about to run.
    ToolCallStarted { name: String, arguments: Value },
    /// The handler returned. Raw tool output is not carried here.
    ToolCallFinished { name: String, is_error: bool },
    /// Terminal: the model produced its final message.
    Completed { report: String },
    /// Terminal: the session failed (provider error, iteration cap, ...).
    Failed { error: String },
}

impl SessionEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_events() {
        assert!(SessionEvent::Completed { report: "r".into() }.is_terminal());
        assert!(SessionEvent::Failed { error: "e".into() }.is_terminal());
        assert!(
            !SessionEvent::ToolCallStarted {
                name: "file_read".into(),
                arguments: serde_json::json!({"path": "/tmp/x"}),
            }
            .is_terminal()
        );
        assert!(
            !SessionEvent::ToolCallFinished {
                name: "file_read".into(),
                is_error: false,
            }
            .is_terminal()
        );
    }
}
