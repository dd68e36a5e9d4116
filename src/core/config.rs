use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{map_io_err, LinecutError, LinecutResult};
use crate::utils::fs::is_supported_encoding;

/// Name of the project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "linecut.toml";

/// Parameters of a single line-range deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionConfig {
    /// File edited in place
    pub target: PathBuf,
    /// First line to remove (1-based, inclusive)
    pub start_line: usize,
    /// Last line to remove (1-based, inclusive)
    pub end_line: usize,
    /// The deletion only runs when the file has more lines than this
    pub length_threshold: usize,
    /// Text encoding used to read and write the file
    pub encoding: String,
    /// Text the first removed line must contain, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_start: Option<String>,
    /// Text the first kept line after the range must contain, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_end: Option<String>,
    /// Preview only, never write
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for DeletionConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("views/specialist/words.ejs"),
            start_line: 16,
            end_line: 363,
            length_threshold: 370,
            encoding: "utf-8".to_string(),
            expect_start: None,
            expect_end: None,
            dry_run: false,
        }
    }
}

impl DeletionConfig {
    /// 0-based index of the first removed line
    pub fn start_index(&self) -> usize {
        self.start_line - 1
    }

    /// 0-based index of the last removed line
    pub fn end_index(&self) -> usize {
        self.end_line - 1
    }

    /// Number of lines a successful run removes
    pub fn removed_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Overlay every field set in `overrides`
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(target) = overrides.target {
            self.target = target;
        }
        if let Some(start_line) = overrides.start_line {
            self.start_line = start_line;
        }
        if let Some(end_line) = overrides.end_line {
            self.end_line = end_line;
        }
        if let Some(length_threshold) = overrides.length_threshold {
            self.length_threshold = length_threshold;
        }
        if let Some(encoding) = overrides.encoding {
            self.encoding = encoding;
        }
        if overrides.expect_start.is_some() {
            self.expect_start = overrides.expect_start;
        }
        if overrides.expect_end.is_some() {
            self.expect_end = overrides.expect_end;
        }
        if let Some(dry_run) = overrides.dry_run {
            self.dry_run = dry_run;
        }
    }

    /// Check the range against the threshold and the encoding.
    ///
    /// `length_threshold >= end_line` guarantees that the line following the
    /// range exists whenever the guard lets a deletion through.
    pub fn validate(&self) -> LinecutResult<()> {
        if self.start_line == 0 {
            return Err(LinecutError::invalid_config(
                "start_line is 1-based and must be at least 1",
            ));
        }
        if self.start_line > self.end_line {
            return Err(LinecutError::invalid_config(format!(
                "start_line {} is after end_line {}",
                self.start_line, self.end_line
            )));
        }
        if self.length_threshold < self.end_line {
            return Err(LinecutError::invalid_config(format!(
                "length_threshold {} must be at least end_line {}",
                self.length_threshold, self.end_line
            )));
        }
        if !is_supported_encoding(&self.encoding) {
            return Err(LinecutError::invalid_config(format!(
                "unsupported encoding: {}",
                self.encoding
            )));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> LinecutResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| LinecutError::invalid_config(format!("cannot serialize config: {e}")))
    }
}

/// Partial configuration: one config file, or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub target: Option<PathBuf>,
    pub start_line: Option<usize>,
    pub end_line: Option<usize>,
    pub length_threshold: Option<usize>,
    pub encoding: Option<String>,
    pub expect_start: Option<String>,
    pub expect_end: Option<String>,
    pub dry_run: Option<bool>,
}

impl ConfigOverrides {
    /// Parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> LinecutResult<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(map_io_err(path))?;
        toml::from_str(&config_str).map_err(|e| LinecutError::config_parse(path, e.to_string()))
    }
}

/// Layers defaults, the global file, the project file and an explicit file
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader using `<config_dir>/linecut/config.toml` and `./linecut.toml`
    pub fn new() -> Self {
        Self {
            global_path: dirs::config_dir().map(|dir| dir.join("linecut").join("config.toml")),
            project_path: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
        }
    }

    /// Loader with explicit locations for the implicit layers
    pub fn with_paths(global_path: Option<PathBuf>, project_path: Option<PathBuf>) -> Self {
        Self {
            global_path,
            project_path,
        }
    }

    /// Build the effective config, with later layers winning.
    ///
    /// Implicit files are skipped when absent; an explicit file must exist.
    pub fn load(&self, explicit: Option<&Path>) -> LinecutResult<DeletionConfig> {
        let mut config = DeletionConfig::default();

        for path in [&self.global_path, &self.project_path].into_iter().flatten() {
            if path.is_file() {
                info!("Loading configuration from {}", path.display());
                config.apply(ConfigOverrides::from_file(path)?);
            } else {
                debug!("No configuration at {}", path.display());
            }
        }

        if let Some(path) = explicit {
            info!("Loading configuration from {}", path.display());
            config.apply(ConfigOverrides::from_file(path)?);
        }

        Ok(config)
    }
}
