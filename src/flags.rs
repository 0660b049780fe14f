use std::path::PathBuf;

use crate::error::ShellError;

#[derive(Clone, Copy)]
enum FlagKind {
    Help,
    Version,
    Config,
    Quiet,
    Debug,
}

struct FlagSpec {
    kind: FlagKind,
    short: &'static str,
    long: &'static str,
    value: Option<&'static str>,
    description: &'static str,
}

const FLAG_SPECS: &[FlagSpec] = &[
    FlagSpec {
        kind: FlagKind::Help,
        short: "-h",
        long: "--help",
        value: None,
        description: "Print this help message",
    },
    FlagSpec {
        kind: FlagKind::Version,
        short: "-v",
        long: "--version",
        value: None,
        description: "Show version information",
    },
    FlagSpec {
        kind: FlagKind::Config,
        short: "-c",
        long: "--config",
        value: Some("<path>"),
        description: "Read settings from <path> instead of ~/.smallshrc",
    },
    FlagSpec {
        kind: FlagKind::Quiet,
        short: "-q",
        long: "--quiet",
        value: None,
        description: "Suppress non-essential warnings",
    },
    FlagSpec {
        kind: FlagKind::Debug,
        short: "-d",
        long: "--debug",
        value: None,
        description: "Enable debug logging on stderr",
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub debug: bool,
    pub config: Option<PathBuf>,
}

impl Flags {
    pub fn parse(args: &[String]) -> Result<Self, ShellError> {
        let mut flags = Flags::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let spec = FLAG_SPECS
                .iter()
                .find(|spec| arg == spec.short || arg == spec.long)
                .ok_or_else(|| ShellError::Flag(format!("unknown option {}", arg)))?;

            match spec.kind {
                FlagKind::Help => flags.help = true,
                FlagKind::Version => flags.version = true,
                FlagKind::Quiet => flags.quiet = true,
                FlagKind::Debug => flags.debug = true,
                FlagKind::Config => {
                    let path = iter.next().ok_or_else(|| {
                        ShellError::Flag(format!("flag {} requires a value", arg))
                    })?;
                    flags.config = Some(PathBuf::from(path));
                }
            }
        }
        Ok(flags)
    }

    pub fn print_help() {
        println!("Usage: smallsh [OPTIONS]");
        println!("\nOptions:");
        for spec in FLAG_SPECS {
            let long = match spec.value {
                Some(value) => format!("{} {}", spec.long, value),
                None => spec.long.to_string(),
            };
            println!("  {}, {:<18} {}", spec.short, long, spec.description);
        }
    }
}
