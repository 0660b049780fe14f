use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// How a child finished: its exit value, or the signal that killed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    Exited(i32),
    Signaled(i32),
}

impl Default for ExitReport {
    fn default() -> Self {
        ExitReport::Exited(0)
    }
}

impl ExitReport {
    /// Decodes a raw `waitpid` status word.
    pub fn from_raw(raw: i32) -> Self {
        ExitStatus::from_raw(raw).into()
    }

    pub fn is_signaled(&self) -> bool {
        matches!(self, ExitReport::Signaled(_))
    }
}

impl From<ExitStatus> for ExitReport {
    fn from(status: ExitStatus) -> Self {
        match status.signal() {
            Some(signal) => ExitReport::Signaled(signal),
            None => ExitReport::Exited(status.code().unwrap_or_default()),
        }
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReport::Exited(code) => write!(f, "exit value {}", code),
            ExitReport::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}
