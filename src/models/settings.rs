use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Inclusion depth allowed for `-A` argument files unless configured otherwise.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// Installation-level settings for the tool itself.
///
/// These are not per-run options: they come from `pgnopts.yaml` and the
/// environment, and tell the resolver where defaults live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// `tracing` filter directive, e.g. `warn` or `pgnopts=debug`.
    pub log_level: String,

    /// Directory for rolling log files. Logs go to stderr when unset.
    pub log_dir: Option<Utf8PathBuf>,

    /// Write the rolling log as JSON lines.
    pub log_json: bool,

    pub max_include_depth: usize,

    /// ECO file used by `-e` when none is named.
    pub eco_file: Option<Utf8PathBuf>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: None,
            log_json: false,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            eco_file: None,
        }
    }
}
