use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// `status`: outcome of the last foreground command, `exit value 0` before any ran.
#[derive(Clone)]
pub struct StatusCommand;

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        writeln!(out, "{}", state.last_status())?;
        Ok(Flow::Continue)
    }
}
