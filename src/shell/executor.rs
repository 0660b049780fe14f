use std::io;

use tracing::{debug, trace};

use crate::{
    error::ShellError,
    input,
    process::{self, ExitReport, LaunchMode, Launched},
};

use super::parser::ParsedCommand;

pub(crate) use crate::core::commands::Flow;

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    /// Expands, parses and runs one input line.
    ///
    /// Recoverable errors are reported here and the loop continues; only a
    /// fatal launch error is returned.
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        // A stop signal that arrived while the line was being read applies to it.
        self.apply_mode_toggles();

        if input::is_ignorable(line) {
            return Ok(Flow::Continue);
        }

        let expanded = self.expander.expand(line);
        trace!(line = %expanded, "expanded line");

        let command = match ParsedCommand::parse(&expanded) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(Flow::Continue);
            }
        };

        if self.builtins.is_builtin(command.program()) {
            return Ok(self.run_builtin(&command));
        }

        self.launch(&command)?;
        self.report_finished_jobs();
        Ok(Flow::Continue)
    }
}

impl super::Shell {
    /// Runs a builtin in the shell process, honouring `> path` only.
    fn run_builtin(&mut self, command: &ParsedCommand) -> Flow {
        let result = match command.output() {
            Some(path) => match process::open_output(path) {
                Ok(mut file) => {
                    self.builtins
                        .execute(command.program(), command.args(), &self.state, &mut file)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return Flow::Continue;
                }
            },
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                self.builtins
                    .execute(command.program(), command.args(), &self.state, &mut out)
            }
        };

        match result {
            Some(Ok(flow)) => flow,
            Some(Err(e)) => {
                eprintln!("{}", e);
                Flow::Continue
            }
            None => Flow::Continue,
        }
    }

    fn launch(&mut self, command: &ParsedCommand) -> Result<(), ShellError> {
        let mode = self.state.launch_mode(command);
        debug!(argv = ?command.argv(), ?mode, "launching");

        match self.executor.launch(command, mode) {
            Ok(Launched::Background { pid }) => {
                println!("background pid is {}", pid);
            }
            Ok(Launched::Foreground { report }) => {
                if report.is_signaled() {
                    println!("{}", report);
                }
                self.state.record_foreground(report);
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                eprintln!("{}", e);
                match mode {
                    LaunchMode::Foreground => self.state.record_foreground(ExitReport::Exited(1)),
                    LaunchMode::Background => {
                        let pid = self.executor.spawn_failed_job()?;
                        println!("background pid is {}", pid);
                    }
                }
            }
        }
        Ok(())
    }
}
