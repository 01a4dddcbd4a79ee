use clap::ArgMatches;
use log::info;

use crate::cli::{self, CliError};

/// Dispatch the selected subcommand and return the process exit code.
pub fn run(args: &ArgMatches) -> Result<i32, CliError> {
    info!("Starting animix {}", env!("CARGO_PKG_VERSION"));
    match args.subcommand() {
        Some(("mix", sub)) => cli::mix::run_mix(sub),
        Some(("constant", sub)) => cli::clip::run_constant(sub),
        Some(("info", sub)) => cli::clip::run_info(sub),
        Some(("events", sub)) => cli::events::run_events(sub),
        Some(("create", sub)) => match sub.subcommand() {
            Some(("mix-json", _)) => cli::create::run_create_mix_json(),
            _ => Ok(2),
        },
        _ => Ok(2),
    }
}
