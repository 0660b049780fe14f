use smallsh::core::config::ShellConfig;
use smallsh::error::ShellError;
use smallsh::flags::Flags;
use smallsh::logging;
use smallsh::shell::Shell;
use std::env;
use tracing::warn;

fn main() -> Result<(), ShellError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let flags = Flags::parse(&args)?;

    if flags.help {
        Flags::print_help();
        return Ok(());
    }

    if flags.version {
        println!("smallsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match ShellConfig::load(flags.config.as_deref()) {
        Ok(config) => config,
        // A broken ~/.smallshrc shouldn't lock the user out of the shell.
        Err(e) if flags.config.is_none() => {
            eprintln!("smallsh: {}; using defaults", e);
            ShellConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    logging::init_logging(flags.debug, config.log_level.as_deref());
    for key in &config.unknown_keys {
        warn!(key = %key, "ignoring unknown config key");
    }

    let mut shell = Shell::new(&flags, &config)?;
    shell.run()
}
