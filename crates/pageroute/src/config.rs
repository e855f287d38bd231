// File: src/config.rs
// Purpose: Configuration parsing from pageroute.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CompileOptions, MixinSet, DEFAULT_EXTENSION};

/// Default configuration file name
pub const CONFIG_FILE: &str = "pageroute.toml";

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Mixin name → fields merged into routes that reference it
    #[serde(default)]
    pub mixin: MixinSet,
}

/// Where pages live and where the route table goes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Directory containing page files (default: "pages")
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Page-file extension without the dot (default: "vue")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Directory the route table is written to (default: parent of pages_dir)
    #[serde(default)]
    pub output_dir: Option<String>,

    /// File name of the route table inside output_dir (default: "routes.js")
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

// Default values
fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_output_file() -> String {
    "routes.js".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            extension: default_extension(),
            output_dir: None,
            output_file: default_output_file(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // A missing config file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from the default path (./pageroute.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }

    /// Parse configuration from TOML text; blank text yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    pub fn pages_dir(&self) -> PathBuf {
        PathBuf::from(&self.routing.pages_dir)
    }

    /// Output directory, falling back to the parent of the pages directory
    pub fn output_dir(&self) -> PathBuf {
        match &self.routing.output_dir {
            Some(dir) => PathBuf::from(dir),
            None => self
                .pages_dir()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    /// Full path of the generated route table
    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(&self.routing.output_file)
    }

    /// Compiler options derived from this configuration
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.pages_dir())
            .with_output_dir(self.output_dir())
            .with_extension(self.routing.extension.clone())
            .with_mixins(self.mixin.clone())
    }
}
