//! Build configuration: built-in defaults, optionally overlaid by a YAML file.
//!
//! Command-line flags (and their env vars) are applied on top by the binary,
//! so the precedence is flag > config file > default.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "featuredoc.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the `.feature` files
    pub input: PathBuf,
    /// Root of the generated site
    pub output: PathBuf,
    /// Output format: html, markdown or json
    pub format: String,
    /// Route segment for the listing page; detail pages live below it
    pub route: String,
    /// Heading of the listing page
    pub title: String,
    /// File-name glob patterns to leave out, e.g. "draft-*.feature"
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("features"),
            output: PathBuf::from("dist"),
            format: "html".to_string(),
            route: "features".to_string(),
            title: "Features".to_string(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&data).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `path` if given, else `featuredoc.yaml` from `dir` when it exists,
    /// else the defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_yaml(data: &str) -> std::result::Result<Self, String> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(data).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        let route = self.route.trim_matches('/');
        if route.is_empty() {
            return Err("route must not be empty".to_string());
        }
        if route.split('/').any(|seg| seg == ".." || seg == ".") {
            return Err(format!("route must not contain relative segments: {}", self.route));
        }
        for pattern in &self.exclude {
            glob::Pattern::new(pattern).map_err(|e| format!("invalid exclude pattern '{pattern}': {e}"))?;
        }
        Ok(())
    }

    /// Route with surrounding slashes removed, as used for output paths.
    pub fn route_dir(&self) -> &str {
        self.route.trim_matches('/')
    }
}
