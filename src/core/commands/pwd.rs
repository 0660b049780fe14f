use std::env;
use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        writeln!(out, "{}", env::current_dir()?.display())?;
        Ok(Flow::Continue)
    }
}
