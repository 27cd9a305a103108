use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::VetConfig;

/// Loads the skillvet configuration.
pub struct ConfigLoader {
    config: VetConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLVET_CONFIG env > ~/.skillvet/skillvet.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLVET_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillvet")
            .join("skillvet.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> skillvet_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<VetConfig>(&raw).map_err(|e| {
                skillvet_core::VetError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            VetConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(skillvet_core::VetError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> VetConfig {
        self.config.clone()
    }

    /// Path the config was loaded from (or would be).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SKILLVET_MODEL, SKILLVET_SKILLS_DIR, etc.)
    fn apply_env_overrides(mut config: VetConfig) -> VetConfig {
        if let Ok(v) = std::env::var("SKILLVET_MODEL") {
            config.agent.model = v;
        }
        if let Ok(v) = std::env::var("SKILLVET_SKILLS_DIR") {
            config.review.skills_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SKILLVET_GH_BIN") {
            config.github.bin = v;
        }
        if let Ok(v) = std::env::var("SKILLVET_LOG_LEVEL") {
            config.logging.level = v;
        }
        if config.services.anthropic_api_key.is_none()
            && let Ok(v) = std::env::var("ANTHROPIC_API_KEY")
        {
            config.services.anthropic_api_key = Some(v);
        }
        config
    }
}
