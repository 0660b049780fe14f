use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{signal, Direction, ExitReport, ProcessError};
use crate::shell::parser::ParsedCommand;

const OUTPUT_MODE: u32 = 0o666;

/// Whether the parent waits for the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Foreground,
    Background,
}

impl LaunchMode {
    /// A requested `&` only counts outside foreground-only mode.
    pub fn resolve(background_requested: bool, foreground_only: bool) -> Self {
        if background_requested && !foreground_only {
            LaunchMode::Background
        } else {
            LaunchMode::Foreground
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launched {
    Foreground { report: ExitReport },
    Background { pid: u32 },
}

#[derive(Debug, Default, Clone)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Starts exactly one child for `command`.
    ///
    /// Redirection targets are opened here and handed to the child as its
    /// stdin/stdout; the shell's copies are closed as soon as the spawn returns.
    pub fn launch(
        &self,
        command: &ParsedCommand,
        mode: LaunchMode,
    ) -> Result<Launched, ProcessError> {
        let program = command.program();
        let stdin = input_for(command.input(), mode)?;
        let stdout = output_for(command.output(), mode)?;

        let mut process = Command::new(program);
        process
            .args(command.args())
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::inherit());
        unsafe {
            process.pre_exec(signal::child_dispositions);
        }

        let mut child = process
            .spawn()
            .map_err(|e| ProcessError::from_spawn(program, e))?;
        let pid = child.id();
        debug!(pid, program, ?mode, "spawned child");

        match mode {
            LaunchMode::Background => Ok(Launched::Background { pid }),
            LaunchMode::Foreground => {
                let status = child.wait().map_err(ProcessError::Wait)?;
                let report = ExitReport::from(status);
                debug!(pid, %report, "foreground child finished");
                Ok(Launched::Foreground { report })
            }
        }
    }

    /// Stands in for a background job that could not start.
    ///
    /// The child exits 1 straight away, so the reaper reports the failed job
    /// like any other finished one.
    pub fn spawn_failed_job(&self) -> Result<u32, ProcessError> {
        match unsafe { libc::fork() } {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => unsafe { libc::_exit(1) },
            pid => {
                debug!(pid, "spawned stand-in for failed background job");
                Ok(pid as u32)
            }
        }
    }
}

/// Opens a `>` target: write-only, created, truncated, mode 0666 before umask.
pub fn open_output(path: &Path) -> Result<File, ProcessError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(path)
        .map_err(|source| ProcessError::Open {
            path: path.to_path_buf(),
            direction: Direction::Output,
            source,
        })
}

fn input_for(path: Option<&Path>, mode: LaunchMode) -> Result<Stdio, ProcessError> {
    match path {
        Some(path) => File::open(path)
            .map(Stdio::from)
            .map_err(|source| ProcessError::Open {
                path: path.to_path_buf(),
                direction: Direction::Input,
                source,
            }),
        None if mode == LaunchMode::Background => Ok(Stdio::null()),
        None => Ok(Stdio::inherit()),
    }
}

fn output_for(path: Option<&Path>, mode: LaunchMode) -> Result<Stdio, ProcessError> {
    match path {
        Some(path) => open_output(path).map(Stdio::from),
        None if mode == LaunchMode::Background => Ok(Stdio::null()),
        None => Ok(Stdio::inherit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(line: &str) -> ParsedCommand {
        ParsedCommand::parse(line).unwrap()
    }

    #[test]
    fn test_resolve_mode() {
        assert_eq!(LaunchMode::resolve(true, false), LaunchMode::Background);
        assert_eq!(LaunchMode::resolve(true, true), LaunchMode::Foreground);
        assert_eq!(LaunchMode::resolve(false, false), LaunchMode::Foreground);
        assert_eq!(LaunchMode::resolve(false, true), LaunchMode::Foreground);
    }

    fn script(dir: &Path, body: &str) -> String {
        let path = dir.join("script.sh");
        fs::write(&path, body).unwrap();
        format!("sh {}", path.display())
    }

    #[test]
    fn test_foreground_exit_value() {
        let dir = tempdir().unwrap();
        let executor = ProcessExecutor::new();

        let launched = executor
            .launch(&parse(&script(dir.path(), "exit 3\n")), LaunchMode::Foreground)
            .unwrap();
        match launched {
            Launched::Foreground { report, .. } => assert_eq!(report, ExitReport::Exited(3)),
            other => panic!("unexpected launch result: {:?}", other),
        }

        let launched = executor
            .launch(&parse("false"), LaunchMode::Foreground)
            .unwrap();
        match launched {
            Launched::Foreground { report, .. } => assert_eq!(report, ExitReport::Exited(1)),
            other => panic!("unexpected launch result: {:?}", other),
        }
    }

    #[test]
    fn test_foreground_killed_by_signal() {
        let dir = tempdir().unwrap();
        let line = script(dir.path(), "kill -TERM $$\n");

        let launched = ProcessExecutor::new()
            .launch(&parse(&line), LaunchMode::Foreground)
            .unwrap();
        match launched {
            Launched::Foreground { report, .. } => {
                assert_eq!(report, ExitReport::Signaled(libc::SIGTERM))
            }
            other => panic!("unexpected launch result: {:?}", other),
        }
    }

    #[test]
    fn test_output_redirection_creates_and_truncates() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.txt");
        fs::write(&out, "old contents that are longer\n").unwrap();

        let line = format!("echo hello > {}", out.display());
        ProcessExecutor::new()
            .launch(&parse(&line), LaunchMode::Foreground)
            .unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");
    }

    #[test]
    fn test_input_and_output_redirection() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("count.txt");
        fs::write(&input, "one\ntwo\nthree\n").unwrap();

        let line = format!("wc -l < {} > {}", input.display(), output.display());
        ProcessExecutor::new()
            .launch(&parse(&line), LaunchMode::Foreground)
            .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap().trim(), "3");
    }

    #[test]
    fn test_missing_input_is_open_error() {
        let dir = tempdir().unwrap();
        let line = format!("cat < {}", dir.path().join("nope.txt").display());

        let err = ProcessExecutor::new()
            .launch(&parse(&line), LaunchMode::Foreground)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Open {
                direction: Direction::Input,
                ..
            }
        ));
        assert!(err.to_string().ends_with("for input"));
    }

    #[test]
    fn test_output_in_missing_directory_is_open_error() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("out.txt");
        let line = format!("ls > {}", target.display());

        let err = ProcessExecutor::new()
            .launch(&parse(&line), LaunchMode::Foreground)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Open {
                direction: Direction::Output,
                ..
            }
        ));
        assert!(!target.exists());
    }

    #[test]
    fn test_unknown_program_is_exec_error() {
        let err = ProcessExecutor::new()
            .launch(
                &parse("definitely-not-a-real-program-4821"),
                LaunchMode::Foreground,
            )
            .unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "definitely-not-a-real-program-4821: command not found"
        );
    }

    #[test]
    fn test_background_returns_without_waiting() {
        let launched = ProcessExecutor::new()
            .launch(&parse("sleep 5 &"), LaunchMode::Background)
            .unwrap();
        let pid = match launched {
            Launched::Background { pid } => pid as libc::pid_t,
            other => panic!("unexpected launch result: {:?}", other),
        };

        // Still running: the launch did not block on it.
        let mut status = 0;
        let polled = unsafe { libc::waitpid(pid, &mut status, libc::WNOHANG) };
        assert_eq!(polled, 0);

        unsafe {
            libc::kill(pid, libc::SIGKILL);
            libc::waitpid(pid, &mut status, 0);
        }
        assert_eq!(ExitReport::from_raw(status), ExitReport::Signaled(libc::SIGKILL));
    }

    #[test]
    fn test_failed_job_exits_one() {
        let pid = ProcessExecutor::new().spawn_failed_job().unwrap() as libc::pid_t;

        let mut status = 0;
        let waited = unsafe { libc::waitpid(pid, &mut status, 0) };
        assert_eq!(waited, pid);
        assert_eq!(ExitReport::from_raw(status), ExitReport::Exited(1));
    }

    #[test]
    fn test_open_output_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous\n").unwrap();

        let mut file = open_output(&path).unwrap();
        io::Write::write_all(&mut file, b"new\n").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }
}
