pub use crate::models::ToolSettings;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat, Map};
use std::fs;

/// Name of the settings file inside the settings directory.
pub const SETTINGS_FILE: &str = "pgnopts.yaml";

/// Prefix of environment variables that override settings, e.g. `PGNOPTS_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "PGNOPTS";

/// Unprefixed variable naming the default ECO file.
pub const ECO_FILE_VAR: &str = "ECO_FILE";

/// Loads and saves [`ToolSettings`].
///
/// Settings are layered: built-in defaults, then `pgnopts.yaml` in the
/// settings directory if it exists, then `PGNOPTS_*` environment variables,
/// then `ECO_FILE`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for the given settings directory.
    ///
    /// The directory does not have to exist until settings are saved.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        }
    }

    /// Load settings using the process environment.
    pub fn load_settings(&self) -> Result<ToolSettings> {
        self.load_settings_with_env(std::env::vars().collect())
    }

    /// Load settings with an explicit set of environment variables.
    pub fn load_settings_with_env(&self, env: Map<String, String>) -> Result<ToolSettings> {
        let eco_file = env.get(ECO_FILE_VAR).cloned();

        if self.settings_path.exists() {
            tracing::debug!("Reading settings from {}", self.settings_path);
        }

        let layered = Config::builder()
            .add_source(File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .set_override_option("eco_file", eco_file)
            .context("Failed to apply ECO_FILE")?
            .build()
            .with_context(|| format!("Failed to load settings from {}", self.settings_path))?;

        let settings: ToolSettings = layered
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", self.settings_path))?;

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Save settings as YAML, creating the settings directory if needed.
    pub fn save_settings(&self, settings: &ToolSettings) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)
                .with_context(|| format!("Failed to create settings directory: {}", self.config_dir))?;
        }

        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the settings directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
