use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

mod builtin;
mod cd;
mod pwd;
mod status;

pub use builtin::ExitCommand;
pub use cd::CdCommand;
pub use pwd::PwdCommand;
pub use status::StatusCommand;

use super::state::ShellState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cd: {}: {}", .path.display(), .source)]
    Chdir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the control loop does after a builtin returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command run inside the shell process instead of a child.
///
/// `out` is stdout or the `>` target; `<` and the background marker do not
/// apply to builtins.
pub trait Command {
    fn execute(
        &self,
        args: &[String],
        state: &ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Pwd(PwdCommand),
    Status(StatusCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        state: &ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state, out),
            CommandType::Exit(cmd) => cmd.execute(args, state, out),
            CommandType::Pwd(cmd) => cmd.execute(args, state, out),
            CommandType::Status(cmd) => cmd.execute(args, state, out),
        }
    }
}

#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("status", CommandType::Status(StatusCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Runs `name` if it is a builtin; `None` means it must be launched as a child.
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        state: &ShellState,
        out: &mut dyn Write,
    ) -> Option<Result<Flow, CommandError>> {
        self.commands
            .get(name)
            .map(|cmd| cmd.execute(args, state, out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ExitReport;

    fn run(builtins: &Builtins, name: &str, args: &[&str], state: &ShellState) -> (Flow, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let flow = builtins
            .execute(name, &args, state, &mut out)
            .expect("builtin")
            .unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_builtin_detection() {
        let builtins = Builtins::new();
        for name in ["cd", "exit", "pwd", "status"] {
            assert!(builtins.is_builtin(name));
        }
        assert!(!builtins.is_builtin("ls"));
        assert!(!builtins.is_builtin("cdrom"));
        assert!(!builtins.is_builtin(""));
    }

    #[test]
    fn test_external_command_is_not_handled() {
        let builtins = Builtins::new();
        let mut out = Vec::new();
        assert!(builtins
            .execute("ls", &[], &ShellState::new(), &mut out)
            .is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_status_tracks_foreground() {
        let builtins = Builtins::new();
        let mut state = ShellState::new();

        let (flow, output) = run(&builtins, "status", &[], &state);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(output, "exit value 0\n");

        state.record_foreground(ExitReport::Exited(1));
        let (_, output) = run(&builtins, "status", &[], &state);
        assert_eq!(output, "exit value 1\n");
    }

    #[test]
    fn test_exit_ends_loop() {
        let builtins = Builtins::new();
        let (flow, output) = run(&builtins, "exit", &[], &ShellState::new());
        assert_eq!(flow, Flow::Exit);
        assert!(output.is_empty());
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::Chdir {
                path: PathBuf::from("/nope"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            CommandError::HomeNotSet,
            CommandError::TooManyArguments("cd"),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
