use crate::core::dirs::{get_cache_directory, get_config_directory};
use crate::core::error::{AnalyzerError, Result};
use crate::core::paths::PathNormalizer;
use crate::core::scanner::IgnoredComponents;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RELEASE_BASE_URL: &str =
    "https://github.com/cfengine/release-information/releases/latest/download";
pub const DEFAULT_RELEASE_TAG: &str = "latest";
pub const DEFAULT_MASTERFILES_DIRNAME: &str = "masterfiles";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub release_base_url: String,
    pub release_tag: String,
    pub cache_dir: Option<PathBuf>,
    pub masterfiles_dirname: String,
    pub extra_ignored_path_components: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            release_tag: DEFAULT_RELEASE_TAG.to_string(),
            cache_dir: None,
            masterfiles_dirname: DEFAULT_MASTERFILES_DIRNAME.to_string(),
            extra_ignored_path_components: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Load `config.json` from the config directory, or defaults when absent.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&get_config_directory().join("config.json"))
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!("No config at {}, using defaults", config_file.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)
            .map_err(|e| AnalyzerError::file_read(config_file, e))?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}", config_file.display());
        Ok(config)
    }

    /// Root of the release information cache.
    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(get_cache_directory)
    }
}

/// Resolved settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeContext {
    pub path: PathBuf,
    pub normalizer: PathNormalizer,
    pub ignored: IgnoredComponents,
    pub reference_version: Option<String>,
}

impl AnalyzeContext {
    pub fn new(
        path: impl Into<PathBuf>,
        is_parent_layout: bool,
        masterfiles_dirname: &str,
        extra_ignored: &[String],
        reference_version: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            normalizer: PathNormalizer::new(is_parent_layout, masterfiles_dirname),
            ignored: IgnoredComponents::with_extra(extra_ignored.iter().cloned()),
            reference_version: reference_version.map(|v| v.trim().to_string()),
        }
    }
}
