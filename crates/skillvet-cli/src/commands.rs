use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use skillvet_config::{ConfigLoader, VetConfig};
use skillvet_llm::{AnthropicProvider, LlmProvider};
use skillvet_runtime::ReviewRunner;
use skillvet_skills::enumerate_skills;

/// Skillvet — automated review of agent skill directories
#[derive(Parser)]
#[command(name = "skillvet", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillvet.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review every skill and file each report as a GitHub issue
    Run {
        /// Print reports to stdout instead of creating issues
        #[arg(long)]
        dry_run: bool,

        /// Review only the first N skills (in name order)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Override the configured skills directory
        #[arg(long)]
        skills_dir: Option<PathBuf>,
    },
    /// List the skills a run would review, in order
    List {
        /// Override the configured skills directory
        #[arg(long)]
        skills_dir: Option<PathBuf>,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version and build info
    Version,
}

impl Cli {
    pub async fn run(self) -> skillvet_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };

        // Diagnostics go to stderr; stdout carries reports and summaries only.
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_writer(std::io::stderr)
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }

        match self.command {
            Commands::Run {
                dry_run,
                limit,
                skills_dir,
            } => Self::cmd_run(config, dry_run, limit, skills_dir).await,
            Commands::List { skills_dir } => Self::cmd_list(config, skills_dir),
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Version => Self::cmd_version(),
        }
    }

    async fn cmd_run(
        mut config: VetConfig,
        dry_run: bool,
        limit: Option<usize>,
        skills_dir: Option<PathBuf>,
    ) -> skillvet_core::Result<()> {
        if limit == Some(0) {
            return Err(skillvet_core::VetError::Config(
                "--limit must be at least 1".into(),
            ));
        }
        if let Some(dir) = skills_dir {
            config.review.skills_dir = dir;
        }

        let provider = build_provider(&config)?;
        let runner = ReviewRunner::new(config, provider);
        let summary = runner.run(dry_run, limit).await?;

        // Per-skill failures are reported here but never change the exit
        // code; only run-level failures (enumeration, config) do.
        println!(
            "Reviewed {} skill(s): {} succeeded, {} failed",
            summary.attempted, summary.succeeded, summary.failed
        );
        Ok(())
    }

    fn cmd_list(
        mut config: VetConfig,
        skills_dir: Option<PathBuf>,
    ) -> skillvet_core::Result<()> {
        if let Some(dir) = skills_dir {
            config.review.skills_dir = dir;
        }
        let skills = enumerate_skills(&config.review.skills_dir, None)?;
        if skills.is_empty() {
            println!("No skills found in {}", config.review.skills_dir.display());
            return Ok(());
        }
        for skill in &skills {
            println!("{}\t{}", skill.name, skill.path.display());
        }
        Ok(())
    }

    fn cmd_config(config: VetConfig, json: bool) -> skillvet_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| skillvet_core::VetError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_version() -> skillvet_core::Result<()> {
        println!("skillvet v{}", env!("CARGO_PKG_VERSION"));
        println!("   Rust edition: 2024");
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }
}

/// Build the live provider from config. Reviews need a real model; a
/// missing API key is a configuration error, not a runtime surprise.
fn build_provider(config: &VetConfig) -> skillvet_core::Result<Arc<dyn LlmProvider>> {
    let api_key = config
        .services
        .anthropic_api_key
        .clone()
        .ok_or_else(|| {
            skillvet_core::VetError::Config(
                "no Anthropic API key — set services.anthropic_api_key or ANTHROPIC_API_KEY"
                    .into(),
            )
        })?;

    let mut provider = AnthropicProvider::new(api_key);
    if let Some(url) = &config.services.anthropic_base_url {
        provider = provider.with_base_url(url.clone());
    }
    Ok(Arc::new(provider))
}
