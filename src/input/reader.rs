use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use rustyline::{
    config::Configurer, error::ReadlineError, history::FileHistory, Editor, EventHandler, KeyEvent,
};
use tracing::{debug, warn};

use super::helper::{ShellHelper, StopKeyHandler};
use crate::core::config::ShellConfig;
use crate::error::ShellError;

/// Result of one prompt cycle's read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Editing was abandoned (Ctrl-C, or Ctrl-Z after raising the toggle).
    Interrupted,
    Eof,
}

enum Source {
    Interactive(Box<Editor<ShellHelper, FileHistory>>),
    Plain {
        reader: Box<dyn BufRead>,
        prompt_out: Box<dyn Write>,
    },
}

pub struct LineReader {
    source: Source,
    history_file: Option<PathBuf>,
    quiet: bool,
}

impl LineReader {
    /// Uses the line editor when stdin is a terminal, a plain buffered reader otherwise.
    pub fn new(config: &ShellConfig, quiet: bool) -> Result<Self, ShellError> {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal; reading lines without the editor");
            return Ok(Self::from_reader(
                BufReader::new(io::stdin()),
                io::stdout(),
            ));
        }

        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(ShellHelper::new(config.highlight)));
        editor.set_auto_add_history(config.history);
        editor.set_max_history_size(config.history_size)?;
        editor.bind_sequence(
            KeyEvent::ctrl('Z'),
            EventHandler::Conditional(Box::new(StopKeyHandler)),
        );

        let history_file = if config.history {
            config.history_file.clone()
        } else {
            None
        };
        if let Some(path) = &history_file {
            match editor.load_history(path) {
                Ok(()) => debug!(path = %path.display(), "loaded history"),
                Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    if !quiet {
                        warn!(path = %path.display(), error = %e, "couldn't load history");
                    }
                }
            }
        }

        Ok(Self {
            source: Source::Interactive(Box::new(editor)),
            history_file,
            quiet,
        })
    }

    /// Reads from any buffered source, writing prompts to `prompt_out`.
    pub fn from_reader(reader: impl BufRead + 'static, prompt_out: impl Write + 'static) -> Self {
        Self {
            source: Source::Plain {
                reader: Box::new(reader),
                prompt_out: Box::new(prompt_out),
            },
            history_file: None,
            quiet: false,
        }
    }

    /// Shows `prompt` and reads one line with its newline stripped.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match &mut self.source {
            Source::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            Source::Plain { reader, prompt_out } => {
                prompt_out.write_all(prompt.as_bytes())?;
                prompt_out.flush()?;

                let mut buf = Vec::new();
                if reader.read_until(b'\n', &mut buf)? == 0 {
                    return Ok(ReadOutcome::Eof);
                }
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                // Bytes that aren't UTF-8 become U+FFFD; the line still runs.
                Ok(ReadOutcome::Line(
                    String::from_utf8_lossy(&buf).into_owned(),
                ))
            }
        }
    }

    pub fn save_history(&mut self) {
        let (Source::Interactive(editor), Some(path)) = (&mut self.source, &self.history_file)
        else {
            return;
        };
        if let Err(e) = editor.save_history(path) {
            if !self.quiet {
                warn!(path = %path.display(), error = %e, "couldn't save history");
            }
        }
    }
}
