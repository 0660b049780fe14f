use std::borrow::Cow;

use rustyline::{
    completion::Completer,
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Cmd, ConditionalEventHandler, Event, EventContext, Helper, RepeatCount,
};
use tracing::warn;

use crate::highlight::SyntaxHighlighter;
use crate::process::signal;

/// Line editor helper: syntax coloring only, no completion or hints.
#[derive(Clone)]
pub struct ShellHelper {
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new(highlight: bool) -> Self {
        let highlighter = if highlight {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::disabled()
        };
        Self { highlighter }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.highlighter.is_enabled() {
            Cow::Owned(self.highlighter.highlight_line(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_enabled()
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = String;
}

/// Ctrl-Z while editing: the terminal is in raw mode and sends no SIGTSTP,
/// so raise it ourselves and hand control back to the prompt loop.
pub struct StopKeyHandler;

impl ConditionalEventHandler for StopKeyHandler {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext,
    ) -> Option<Cmd> {
        if let Err(e) = signal::request_mode_toggle() {
            warn!(error = %e, "could not raise SIGTSTP");
        }
        Some(Cmd::Interrupt)
    }
}
