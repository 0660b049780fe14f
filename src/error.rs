use thiserror::Error;

use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::process::ProcessError;
use crate::shell::parser::ParseError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Command(#[from] CommandError),
    #[error("{0}")]
    Process(#[from] ProcessError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("flag error: {0}")]
    Flag(String),
}

impl ShellError {
    /// Errors after which the interpreter cannot keep launching commands.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Process(ProcessError::Fork(_)))
    }
}
