//! Filing a finished report as a GitHub issue via the `gh` CLI.
//!
//! `gh` handles authentication and repository targeting itself; we only
//! shell out to it. In dry-run mode nothing is executed and the report
//! goes to stdout instead.

use skillvet_core::{Result, VetError};
use tracing::info;

pub struct IssuePublisher {
    gh_bin: String,
    dry_run: bool,
}

impl IssuePublisher {
    pub fn new(gh_bin: impl Into<String>, dry_run: bool) -> Self {
        Self {
            gh_bin: gh_bin.into(),
            dry_run,
        }
    }

    fn issue_title(skill_name: &str) -> String {
        format!("Skill Review: {skill_name}")
    }

    /// File `report` as an issue titled after the skill. In dry-run mode,
    /// print what would be filed to stdout and return Ok.
    pub async fn publish(&self, skill_name: &str, report: &str) -> Result<()> {
        let title = Self::issue_title(skill_name);

        if self.dry_run {
            println!("=== dry run: would create issue ===");
            println!("{} issue create --title {:?} --body <report>", self.gh_bin, title);
            println!();
            println!("{report}");
            return Ok(());
        }

        info!(title = %title, "creating issue");
        let status = tokio::process::Command::new(&self.gh_bin)
            .args(["issue", "create", "--title", &title, "--body", report])
            .status()
            .await
            .map_err(|e| VetError::Publish(format!("failed to run {}: {}", self.gh_bin, e)))?;

        if !status.success() {
            return Err(VetError::Publish(format!(
                "{} issue create exited with {}",
                self.gh_bin, status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_the_skill() {
        assert_eq!(
            IssuePublisher::issue_title("pdf-tools"),
            "Skill Review: pdf-tools"
        );
    }

    #[tokio::test]
    async fn dry_run_never_executes_the_binary() {
        // A binary that cannot exist; dry-run must still succeed.
        let publisher = IssuePublisher::new("/nonexistent/gh", true);
        publisher.publish("alpha", "## Summary\nok").await.unwrap();
    }

    #[tokio::test]
    async fn spawn_failure_is_a_publish_error() {
        let publisher = IssuePublisher::new("/nonexistent/gh", false);
        let err = publisher.publish("alpha", "report").await.unwrap_err();
        assert!(matches!(err, VetError::Publish(_)));
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_publish_error() {
        // `false` ignores its arguments and exits 1.
        let publisher = IssuePublisher::new("false", false);
        let err = publisher.publish("alpha", "report").await.unwrap_err();
        assert!(err.to_string().contains("exited"));
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        let publisher = IssuePublisher::new("true", false);
        publisher.publish("alpha", "report").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stub_binary_receives_exact_title_and_body() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let argv_file = dir.path().join("argv");
        let stub = dir.path().join("gh-stub");
        std::fs::write(
            &stub,
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\n",
                argv_file.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let publisher = IssuePublisher::new(stub.to_string_lossy(), false);
        publisher
            .publish("pdf-tools", "## Summary\nsolid skill")
            .await
            .unwrap();

        let argv = std::fs::read_to_string(&argv_file).unwrap();
        let args: Vec<&str> = argv.lines().collect();
        assert_eq!(
            args,
            vec![
                "issue",
                "create",
                "--title",
                "Skill Review: pdf-tools",
                "--body",
                "## Summary",
                "solid skill",
            ]
        );
    }
}
