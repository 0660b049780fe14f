use std::borrow::Cow;

pub const PID_PLACEHOLDER: &str = "$$";

/// Substitutes the shell's own pid for every `$$`.
#[derive(Debug, Clone)]
pub struct PlaceholderExpander {
    pid: String,
}

impl PlaceholderExpander {
    pub fn new(pid: u32) -> Self {
        Self {
            pid: pid.to_string(),
        }
    }

    /// Occurrences are matched left to right without overlap, so `$$$` expands
    /// to the pid followed by a lone `$`.
    pub fn expand<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if line.contains(PID_PLACEHOLDER) {
            Cow::Owned(line.replace(PID_PLACEHOLDER, &self.pid))
        } else {
            Cow::Borrowed(line)
        }
    }
}

/// Blank lines and `#` comments never reach the parser.
pub fn is_ignorable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}
