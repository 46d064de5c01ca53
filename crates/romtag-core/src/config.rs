//! Configuration types and parsing for romtag.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["romtag.yml", "romtag.yaml"];

/// Tool configuration from romtag.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the catalog XML file (the `-listxml` output)
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Root of the versioned query cache and record store
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Run log; tab-separated lines are appended here
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Extensions of archive files considered during a scan
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,

    /// Program used to evaluate catalog queries
    #[serde(default = "default_xmlstarlet")]
    pub xmlstarlet: String,

    /// Program used to read and write file labels
    #[serde(default = "default_tag_program")]
    pub tag_program: String,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".romtag")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("romtag.log")
}

fn default_archive_extensions() -> Vec<String> {
    vec!["zip".to_string(), "7z".to_string()]
}

fn default_xmlstarlet() -> String {
    "xmlstarlet".to_string()
}

fn default_tag_program() -> String {
    "tag".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            cache_dir: default_cache_dir(),
            log_file: default_log_file(),
            archive_extensions: default_archive_extensions(),
            xmlstarlet: default_xmlstarlet(),
            tag_program: default_tag_program(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;

        // Relative paths in the file are relative to the file itself
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Load configuration from a directory, falling back to defaults when no
    /// config file is present
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.archive_extensions.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "archive_extensions must list at least one extension".to_string(),
            });
        }
        if let Some(ext) = self
            .archive_extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.') || e.contains('/'))
        {
            return Err(CoreError::ConfigInvalid {
                message: format!("archive extension '{}' must be a bare extension like 'zip'", ext),
            });
        }
        if self.xmlstarlet.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "xmlstarlet program name cannot be empty".to_string(),
            });
        }
        if self.tag_program.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "tag_program cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `path` has one of the configured archive extensions
    pub fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.archive_extensions
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(ext))
            })
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(catalog) = &self.catalog {
            if catalog.is_relative() {
                self.catalog = Some(base.join(catalog));
            }
        }
        if self.cache_dir.is_relative() {
            self.cache_dir = base.join(&self.cache_dir);
        }
        if self.log_file.is_relative() {
            self.log_file = base.join(&self.log_file);
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
