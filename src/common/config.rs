//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{CONFIG_FILE, DEFAULT_ENTRY_POINT, DEFAULT_SCENARIOS_DIR};
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Scenario location settings
    #[serde(default)]
    pub scenarios: ScenariosConfig,

    /// Coverage aggregation settings
    #[serde(default)]
    pub coverage: CoverageConfig,
}

/// Where scenarios live and how their fixtures are launched
#[derive(Debug, Deserialize)]
pub struct ScenariosConfig {
    /// Root directory containing one subdirectory per scenario
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Entry-point script, relative to each scenario's working directory
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Shell used to invoke the entry point
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            entry: default_entry(),
            shell: default_shell(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCENARIOS_DIR)
}

fn default_entry() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}

fn default_shell() -> String {
    "sh".to_string()
}

/// Coverage aggregation settings
#[derive(Debug, Deserialize)]
pub struct CoverageConfig {
    /// Whether to scan fixture stdout for coverage payloads
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Where to write the merged coverage report (JSON), if anywhere
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            report: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from `harness.toml` in the given directory
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| super::Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;
            return toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()));
        }
        Ok(Self::default())
    }
}
