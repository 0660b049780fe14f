mod expander;
mod helper;
mod reader;

pub use expander::{is_ignorable, PlaceholderExpander, PID_PLACEHOLDER};
pub use helper::{ShellHelper, StopKeyHandler};
pub use reader::{LineReader, ReadOutcome};
