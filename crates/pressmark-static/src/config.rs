//! Site configuration loaded from `config.yml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Default config file name, relative to the project root.
pub const CONFIG_FILE: &str = "config.yml";

/// Top-level site configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SiteConfig {
    /// Routes, in declaration order
    pub menu: Vec<MenuEntry>,

    /// Source and output locations
    #[serde(default)]
    pub build: BuildSettings,

    /// Every other top-level key, passed through to templates as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Binds a route to the template that renders it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Route identifier, also the output file stem
    pub path: String,

    /// Template name without extension
    pub render_templates: String,
}

/// Optional `build:` section of the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildSettings {
    /// Source root holding assets, `pages/` and `templates/`
    pub source: PathBuf,

    /// Output root
    pub output: PathBuf,

    /// Extension appended to `renderTemplates` names
    pub template_extension: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            output: PathBuf::from("dist"),
            template_extension: "html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let content = fs::read_to_string(path).map_err(|e| BuildError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = serde_yaml::from_str(&content).map_err(|e| BuildError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Find the menu entry for a content file stem.
    ///
    /// First declared entry wins when paths repeat.
    pub fn route(&self, stem: &str) -> Option<&MenuEntry> {
        self.menu.iter().find(|entry| entry.path == stem)
    }

    /// Site title, when the config carries a string `title`.
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(|v| v.as_str())
    }
}
