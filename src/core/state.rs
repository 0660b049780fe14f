use crate::process::{ExitReport, LaunchMode};
use crate::shell::parser::ParsedCommand;

/// Process-wide interpreter state, owned by the control loop.
///
/// The working directory is not stored here: it is the process cwd, changed
/// only by `cd` and inherited by every child at fork time.
#[derive(Debug, Clone)]
pub struct ShellState {
    pid: u32,
    foreground_only: bool,
    last_status: ExitReport,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self::with_pid(std::process::id())
    }

    pub fn with_pid(pid: u32) -> Self {
        Self {
            pid,
            foreground_only: false,
            last_status: ExitReport::default(),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn foreground_only(&self) -> bool {
        self.foreground_only
    }

    /// Flips foreground-only mode and returns the new setting.
    pub fn toggle_foreground_only(&mut self) -> bool {
        self.foreground_only = !self.foreground_only;
        self.foreground_only
    }

    /// Status of the most recent foreground command; background reaping never touches it.
    pub fn last_status(&self) -> ExitReport {
        self.last_status
    }

    pub fn record_foreground(&mut self, report: ExitReport) {
        self.last_status = report;
    }

    pub fn launch_mode(&self, command: &ParsedCommand) -> LaunchMode {
        LaunchMode::resolve(command.background_requested(), self.foreground_only)
    }
}
