use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// `exit`: stops the prompt loop. Trailing arguments (`exit &`) are ignored;
/// the loop itself signals the process group on the way out.
#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_ignores_arguments() {
        let cmd = ExitCommand::new();
        let mut out = Vec::new();
        let flow = cmd
            .execute(&["now".to_string()], &ShellState::new(), &mut out)
            .unwrap();
        assert_eq!(flow, Flow::Exit);
    }
}
