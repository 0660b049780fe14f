use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

mod loader;
mod paths;

use crate::path::PathExpander;
use loader::ConfigLoader;
pub use paths::ConfigPaths;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Settings from the rc file; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub history: bool,
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub highlight: bool,
    pub log_level: Option<String>,
    /// Keys that were present but not recognised, reported once logging is up.
    pub unknown_keys: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: true,
            history_file: None,
            history_size: DEFAULT_HISTORY_SIZE,
            highlight: true,
            log_level: None,
            unknown_keys: Vec::new(),
        }
    }
}

impl ShellConfig {
    /// Loads `explicit` if given (it must exist), otherwise `~/.smallshrc` when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(&PathExpander::new(), explicit)
    }

    pub fn load_with(expander: &PathExpander, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let paths = ConfigPaths::new(expander).ok();
        let mut config = ShellConfig {
            history_file: paths.as_ref().map(|p| p.history_path.clone()),
            ..ShellConfig::default()
        };

        let loader = ConfigLoader::new(expander);
        match (explicit, &paths) {
            (Some(path), _) => {
                if !path.exists() {
                    return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
                }
                loader.load_file(path, &mut config)?;
            }
            (None, Some(paths)) => loader.source_if_exists(&paths.rc_path, &mut config)?,
            (None, None) => debug!("no home directory; using default configuration"),
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,
    #[error("config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),
    #[error("line {line}: expected `key = value`, found {content:?}")]
    InvalidLine { line: usize, content: String },
    #[error("line {line}: invalid value {value:?} for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
