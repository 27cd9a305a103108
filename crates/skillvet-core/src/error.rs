use thiserror::Error;

/// Unified error type for the skillvet workspace.
#[derive(Error, Debug)]
pub enum VetError {
    // ── Enumeration errors ─────────────────────────────────────
    #[error("skill enumeration failed: {0}")]
    Enumeration(String),

    // ── LLM errors ─────────────────────────────────────────────
    #[error("llm provider error: {0}")]
    LlmProvider(String),

    #[error("llm rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Session errors ─────────────────────────────────────────
    #[error("session error: {0}")]
    Session(String),

    #[error("session timed out after {timeout_secs}s")]
    SessionTimeout { timeout_secs: u64 },

    // ── Tool errors ────────────────────────────────────────────
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("tool execution failed: {tool}: {reason}")]
    ToolExecution { tool: String, reason: String },

    // ── Publish errors ─────────────────────────────────────────
    #[error("issue publish failed: {0}")]
    Publish(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VetError>;
