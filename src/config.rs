use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DumpError, DumpResult};

/// How record fields that are not externally visible are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityMode {
    /// Read and render restricted fields, marking them `:unexported`
    CopyPrivate,
    /// Leave restricted fields out of the output entirely
    #[default]
    SkipPrivate,
}

/// What happens when a value has no renderable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedPolicy {
    /// Emit nothing for the value and keep going
    #[default]
    Omit,
    /// Abort the whole rendering with [`DumpError::Unsupported`]
    Fail,
}

/// Rendering options shared by every frame of one dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DumpConfig {
    pub visibility: VisibilityMode,
    pub unsupported: UnsupportedPolicy,
    pub cycle_guard: bool,
    pub max_depth: Option<usize>,
    pub indent: String,
}

impl DumpConfig {
    pub fn new() -> Self {
        Self {
            visibility: VisibilityMode::default(),
            unsupported: UnsupportedPolicy::default(),
            cycle_guard: true,
            max_depth: None,
            indent: "\t".to_string(),
        }
    }

    pub fn with_visibility(mut self, visibility: VisibilityMode) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_unsupported(mut self, unsupported: UnsupportedPolicy) -> Self {
        self.unsupported = unsupported;
        self
    }

    pub fn with_cycle_guard(mut self, cycle_guard: bool) -> Self {
        self.cycle_guard = cycle_guard;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> DumpResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| DumpError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/vardump/config.json`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vardump").join("config.json"))
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self::new()
    }
}
