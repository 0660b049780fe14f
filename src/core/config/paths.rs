use std::path::PathBuf;

use super::ConfigError;
use crate::path::PathExpander;

const RC_FILE: &str = ".smallshrc";
const HISTORY_FILE: &str = ".smallsh_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new(expander: &PathExpander) -> Result<Self, ConfigError> {
        let home = expander.home_dir()?;

        Ok(ConfigPaths {
            rc_path: home.join(RC_FILE),
            history_path: home.join(HISTORY_FILE),
        })
    }
}
