//! # Animix
//!
//! A command-line tool for mixing and editing animation clips.

use log::{error, LevelFilter};

mod cli;
mod logging;
mod runner;

fn main() {
    let args = cli::args::build_cli().get_matches();

    let override_level = if args.get_flag("quiet") {
        Some(LevelFilter::Error)
    } else if args.get_flag("debug") {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logging::init(override_level);

    let code = match runner::run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            1
        }
    };

    std::process::exit(code)
}
