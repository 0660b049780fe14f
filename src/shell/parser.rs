use std::path::{Path, PathBuf};

use thiserror::Error;

const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";
const BACKGROUND_MARKER: &str = "&";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: missing path after '{0}'")]
    MissingPath(char),
    #[error("syntax error: more than one '{0}' redirection")]
    DuplicateRedirect(char),
    #[error("syntax error: missing command")]
    MissingCommand,
}

/// One input line, split into argv plus its I/O and background directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    argv: Vec<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    background: bool,
}

impl ParsedCommand {
    /// Syntax: `command [arg...] [< input] [> output] [&]`.
    ///
    /// `&` is the background marker only as the very last token, and only if a
    /// redirection did not already take it as its path. Anywhere else it is an
    /// ordinary argument.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let last = tokens.len().saturating_sub(1);

        let mut argv = Vec::new();
        let mut input = None;
        let mut output = None;
        let mut background = false;

        let mut iter = tokens.iter().copied().enumerate();
        while let Some((index, token)) = iter.next() {
            match token {
                INPUT_REDIRECT => {
                    let (_, path) = iter.next().ok_or(ParseError::MissingPath('<'))?;
                    set_once(&mut input, path, '<')?;
                }
                OUTPUT_REDIRECT => {
                    let (_, path) = iter.next().ok_or(ParseError::MissingPath('>'))?;
                    set_once(&mut output, path, '>')?;
                }
                BACKGROUND_MARKER if index == last => background = true,
                _ => argv.push(token.to_string()),
            }
        }

        if argv.is_empty() {
            return Err(ParseError::MissingCommand);
        }

        Ok(Self {
            argv,
            input,
            output,
            background,
        })
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn background_requested(&self) -> bool {
        self.background
    }
}

fn set_once(slot: &mut Option<PathBuf>, path: &str, operator: char) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::DuplicateRedirect(operator));
    }
    *slot = Some(PathBuf::from(path));
    Ok(())
}
