use std::fmt;
use std::io;

use tracing::{debug, warn};

use super::ExitReport;

/// A background child observed to have finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRecord {
    pub pid: i32,
    pub report: ExitReport,
}

impl fmt::Display for ChildRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "background pid {} is done: {}", self.pid, self.report)
    }
}

/// Collects terminated children without ever blocking.
///
/// No job table is kept: whatever `waitpid(-1, WNOHANG)` hands back is
/// reported and forgotten.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reaper;

impl Reaper {
    pub fn new() -> Self {
        Self
    }

    /// Iterates over every child that has already terminated.
    pub fn finished(&self) -> Finished {
        Finished { done: false }
    }
}

pub struct Finished {
    done: bool,
}

impl Iterator for Finished {
    type Item = ChildRecord;

    fn next(&mut self) -> Option<ChildRecord> {
        if self.done {
            return None;
        }
        let record = try_wait_any();
        self.done = record.is_none();
        record
    }
}

fn try_wait_any() -> Option<ChildRecord> {
    loop {
        let mut status: libc::c_int = 0;
        let pid = unsafe { libc::waitpid(-1, &mut status, libc::WNOHANG) };
        match pid {
            0 => return None,
            -1 => {
                let err = io::Error::last_os_error();
                match err.raw_os_error() {
                    Some(libc::EINTR) => continue,
                    Some(libc::ECHILD) => {}
                    _ => warn!(error = %err, "waitpid failed while reaping"),
                }
                return None;
            }
            pid => {
                let record = ChildRecord {
                    pid,
                    report: ExitReport::from_raw(status),
                };
                debug!(pid, report = %record.report, "reaped background child");
                return Some(record);
            }
        }
    }
}
