use std::env;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// `cd [dir]`: no argument means `$HOME`. On failure the cwd is left as it was.
#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn target(args: &[String]) -> Result<PathBuf, CommandError> {
        match args {
            [] => env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or(CommandError::HomeNotSet),
            [dir] => Ok(PathBuf::from(dir)),
            _ => Err(CommandError::TooManyArguments("cd")),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let path = Self::target(args)?;
        env::set_current_dir(&path).map_err(|source| CommandError::Chdir {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "changed directory");
        Ok(Flow::Continue)
    }
}
