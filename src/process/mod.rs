use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod executor;
pub mod reaper;
pub mod signal;
pub mod status;

pub use executor::{open_output, LaunchMode, Launched, ProcessExecutor};
pub use reaper::{ChildRecord, Reaper};
pub use signal::SignalCoordinator;
pub use status::ExitReport;

/// Which standard stream a redirection target replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("fork failed: {0}")]
    Fork(#[source] io::Error),
    #[error("{program}: {}", exec_reason(.source))]
    Exec { program: String, source: io::Error },
    #[error("cannot open {} for {direction}", .path.display())]
    Open {
        path: PathBuf,
        direction: Direction,
        source: io::Error,
    },
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
    #[error("signal error: {0}")]
    Signal(#[source] io::Error),
}

impl ProcessError {
    /// Sorts a spawn failure into process-creation failures and exec failures.
    ///
    /// `EAGAIN` and `ENOMEM` come from the fork itself; everything else is the
    /// errno reported back by the failed exec.
    pub fn from_spawn(program: &str, err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::EAGAIN) | Some(libc::ENOMEM) => ProcessError::Fork(err),
            _ => ProcessError::Exec {
                program: program.to_string(),
                source: err,
            },
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Fork(_))
    }
}

fn exec_reason(err: &io::Error) -> String {
    if err.kind() == io::ErrorKind::NotFound {
        return "command not found".to_string();
    }
    let text = err.to_string();
    match text.split_once(" (os error") {
        Some((reason, _)) => reason.to_string(),
        None => text,
    }
}
