use tracing::{debug, info, warn};

mod executor;
pub mod parser;

use crate::{
    core::{commands::Builtins, config::ShellConfig, state::ShellState},
    error::ShellError,
    flags::Flags,
    input::{LineReader, PlaceholderExpander, ReadOutcome},
    process::{signal, ProcessExecutor, Reaper, SignalCoordinator},
};

use executor::{CommandHandler, Flow};

pub const PROMPT: &str = ": ";

pub struct Shell {
    pub(crate) reader: LineReader,
    pub(crate) state: ShellState,
    pub(crate) signals: SignalCoordinator,
    pub(crate) builtins: Builtins,
    pub(crate) executor: ProcessExecutor,
    pub(crate) reaper: Reaper,
    pub(crate) expander: PlaceholderExpander,
}

impl Shell {
    pub fn new(flags: &Flags, config: &ShellConfig) -> Result<Self, ShellError> {
        let signals = SignalCoordinator::install()?;
        let reader = LineReader::new(config, flags.quiet)?;
        let state = ShellState::new();
        let expander = PlaceholderExpander::new(state.pid());

        Ok(Shell {
            reader,
            state,
            signals,
            builtins: Builtins::new(),
            executor: ProcessExecutor::new(),
            reaper: Reaper::new(),
            expander,
        })
    }

    /// Runs the prompt loop until `exit` or end of input.
    ///
    /// Only a failure to create processes (or to talk to the terminal) ends the
    /// loop early with an error. Children are interrupted on every way out.
    pub fn run(&mut self) -> Result<(), ShellError> {
        info!(pid = self.state.pid(), "shell started");
        let result = self.prompt_loop();
        self.shutdown();
        result
    }

    fn prompt_loop(&mut self) -> Result<(), ShellError> {
        loop {
            self.report_finished_jobs();
            self.signals.ignore_interrupt()?;
            self.apply_mode_toggles();

            match self.reader.read_line(PROMPT)? {
                ReadOutcome::Line(line) => {
                    if self.execute_line(&line)? == Flow::Exit {
                        return Ok(());
                    }
                }
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => {
                    debug!("end of input");
                    return Ok(());
                }
            }
        }
    }

    /// Prints every background child that has finished since the last check.
    pub(crate) fn report_finished_jobs(&mut self) {
        for record in self.reaper.finished() {
            println!("{}", record);
        }
    }

    /// Applies stop signals received since the last check, one flip each.
    pub(crate) fn apply_mode_toggles(&mut self) {
        for _ in 0..self.signals.take_toggles() {
            if self.state.toggle_foreground_only() {
                println!("Entering foreground-only mode (& is now ignored)");
            } else {
                println!("Exiting foreground-only mode");
            }
            debug!(foreground_only = self.state.foreground_only(), "mode toggled");
        }
    }

    fn shutdown(&mut self) {
        self.reader.save_history();
        // The shell ignores SIGINT, so this only reaches its children.
        if let Err(e) = signal::interrupt_process_group() {
            warn!(error = %e, "couldn't signal process group on exit");
        }
        debug!("shell exiting");
    }
}
