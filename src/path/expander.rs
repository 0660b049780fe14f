use std::path::{Path, PathBuf};

use crate::core::config::ConfigError;

/// Expands a leading `~` or `~/` against the user's home directory.
#[derive(Debug, Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ConfigError> {
        if path == "~" {
            return self.home_dir().map(Path::to_path_buf);
        }
        match path.strip_prefix("~/") {
            Some(rest) => Ok(self.home_dir()?.join(rest)),
            // "~user/..." is left untouched
            None => Ok(PathBuf::from(path)),
        }
    }

    pub fn home_dir(&self) -> Result<&Path, ConfigError> {
        self.home.as_deref().ok_or(ConfigError::HomeDirNotFound)
    }
}
