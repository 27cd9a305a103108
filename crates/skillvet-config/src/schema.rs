use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `skillvet.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VetConfig {
    pub agent: AgentConfig,
    pub review: ReviewConfig,
    pub github: GithubConfig,
    pub services: ServicesConfig,
    pub logging: LoggingConfig,
}

// ── Agent ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier, e.g. "claude-sonnet-4-20250514".
    pub model: String,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tool-loop iterations before a session is marked failed.
    pub max_iterations: u32,
    /// Maximum wall-clock seconds to wait for a session to finish.
    /// 0 = no timeout. The provider is an unbounded external dependency,
    /// so the default caps each review at 5 minutes.
    pub session_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 8192,
            temperature: 0.2,
            max_iterations: 40,
            session_timeout_secs: 300,
        }
    }
}

// ── Review ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Root directory whose immediate subdirectories are the skills to review.
    pub skills_dir: PathBuf,
    /// Restrict the model's file tools to paths under this root.
    /// `None` grants unrestricted read access for the run — the default,
    /// kept visible here so the posture can be tightened without touching
    /// the tool interface.
    pub sandbox_root: Option<PathBuf>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            skills_dir: PathBuf::from("skills"),
            sandbox_root: None,
        }
    }
}

// ── GitHub ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// The issue-tracker CLI binary. Overridable so tests can substitute a stub.
    pub bin: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self { bin: "gh".into() }
    }
}

// ── Services ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Anthropic API key. Falls back to the ANTHROPIC_API_KEY env var.
    pub anthropic_api_key: Option<String>,
    /// Override the Anthropic API base URL (for proxies and tests).
    pub anthropic_base_url: Option<String>,
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
    /// Log format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl VetConfig {
    /// Validate the configuration. Returns warnings; hard errors fail the load.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        if self.agent.max_iterations == 0 {
            return Err("agent.max_iterations must be at least 1".into());
        }
        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(format!(
                "agent.temperature must be in 0.0..=2.0, got {}",
                self.agent.temperature
            ));
        }
        if self.agent.model.trim().is_empty() {
            return Err("agent.model must not be empty".into());
        }
        if self.github.bin.trim().is_empty() {
            return Err("github.bin must not be empty".into());
        }

        if self.review.sandbox_root.is_none() {
            warnings.push(
                "review.sandbox_root is not set — the model has unrestricted read access \
                 to the filesystem for this run"
                    .into(),
            );
        }
        if self.agent.session_timeout_secs == 0 {
            warnings.push("agent.session_timeout_secs is 0 — sessions may block forever".into());
        }

        Ok(warnings)
    }
}
