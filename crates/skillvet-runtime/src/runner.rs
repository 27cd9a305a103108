//! The sequential run loop: enumerate skills, review each one in its own
//! session, publish each report, and keep going when a skill fails.

use std::sync::Arc;

use tracing::{error, info};

use skillvet_config::VetConfig;
use skillvet_core::Result;
use skillvet_llm::LlmProvider;
use skillvet_skills::enumerate_skills;

use crate::prompt::{REVIEW_SYSTEM_PROMPT, build_review_prompt};
use crate::publish::IssuePublisher;
use crate::session::{ReviewSession, SessionOptions, collect_report};
use crate::tools::ReviewTools;

/// Outcome counts for one run. `attempted == succeeded + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct ReviewRunner {
    config: VetConfig,
    provider: Arc<dyn LlmProvider>,
}

impl ReviewRunner {
    pub fn new(config: VetConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self { config, provider }
    }

    /// Review every skill in the configured directory, one session at a
    /// time. A failed skill is logged and counted; the loop continues.
    /// Only enumeration failure aborts the run.
    pub async fn run(&self, dry_run: bool, limit: Option<usize>) -> Result<RunSummary> {
        let skills = enumerate_skills(&self.config.review.skills_dir, limit)?;
        info!(
            skills_dir = %self.config.review.skills_dir.display(),
            count = skills.len(),
            dry_run,
            "starting review run"
        );

        let publisher = IssuePublisher::new(self.config.github.bin.clone(), dry_run);
        let mut summary = RunSummary::default();

        for skill in &skills {
            summary.attempted += 1;
            info!(skill = %skill.name, "reviewing skill");

            match self.review_one(&skill.name, &skill.path, &publisher).await {
                Ok(()) => {
                    summary.succeeded += 1;
                    info!(skill = %skill.name, "review complete");
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(skill = %skill.name, error = %e, "review failed, continuing");
                }
            }
        }

        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "run finished"
        );
        Ok(summary)
    }

    async fn review_one(
        &self,
        name: &str,
        path: &std::path::Path,
        publisher: &IssuePublisher,
    ) -> Result<()> {
        let tools = Arc::new(ReviewTools::new(self.config.review.sandbox_root.clone()));
        let options = SessionOptions {
            model: self.config.agent.model.clone(),
            max_tokens: self.config.agent.max_tokens,
            temperature: self.config.agent.temperature,
            max_iterations: self.config.agent.max_iterations,
        };

        let handle = ReviewSession::spawn(
            Arc::clone(&self.provider),
            tools,
            REVIEW_SYSTEM_PROMPT.to_string(),
            build_review_prompt(path),
            options,
        );

        let report = collect_report(handle, self.config.agent.session_timeout_secs).await?;
        info!(skill = %name, report_bytes = report.len(), "report collected");

        if let Err(e) = publisher.publish(name, &report).await {
            // The report is already collected; don't lose it with the failure.
            error!(skill = %name, "publish failed, report follows\n{report}");
            return Err(e);
        }
        Ok(())
    }
}
