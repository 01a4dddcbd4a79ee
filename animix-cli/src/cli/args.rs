//! CLI argument definitions for `animix-cli`.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("animix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mix, inspect and edit animation clips")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only report errors"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Show debug output"),
        )
        .subcommand(
            Command::new("mix")
                .about("Build a clip from a mix spec")
                .arg(
                    Arg::new("SPEC")
                        .help("Path to the mix spec JSON file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("OUTPUT")
                        .help("Path of the clip file to write")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("clips-dir")
                        .long("clips-dir")
                        .value_name("DIR")
                        .help("Directory clip paths are resolved against (defaults to $ANIMIX_CLIPS_DIR, then the spec's directory)"),
                )
                .arg(
                    Arg::new("asset-index")
                        .long("asset-index")
                        .value_name("FILE")
                        .help("JSON file mapping asset guids to clip paths"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Write the clip without pretty-printing"),
                ),
        )
        .subcommand(
            Command::new("constant")
                .about("Switch the curves of a *CONSTANT clip to stepped tangents")
                .arg(
                    Arg::new("CLIP")
                        .help("The clip file path")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("Write the result here instead of overwriting the input"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .short('f')
                        .action(ArgAction::SetTrue)
                        .help("Process the clip even if its name lacks the CONSTANT suffix"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Print a summary of a clip")
                .arg(
                    Arg::new("CLIP")
                        .help("The clip file path")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the summary as JSON"),
                ),
        )
        .subcommand(
            Command::new("events")
                .about("Edit the events of a clip")
                .subcommand_required(true)
                .subcommand(
                    Command::new("shift")
                        .about("Offset every event, clamped to the clip length")
                        .allow_negative_numbers(true)
                        .arg(
                            Arg::new("CLIP")
                                .help("The clip file path")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("DELTA")
                                .help("Offset in seconds")
                                .required(true)
                                .value_parser(value_parser!(f32))
                                .index(2),
                        )
                        .arg(output_arg()),
                )
                .subcommand(
                    Command::new("paste")
                        .about("Paste events from a clipboard file at a time")
                        .allow_negative_numbers(true)
                        .arg(
                            Arg::new("CLIP")
                                .help("The clip file path")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("CLIPBOARD")
                                .help("Event clipboard JSON file")
                                .required(true)
                                .index(2),
                        )
                        .arg(
                            Arg::new("TIME")
                                .help("Insertion time in seconds")
                                .required(true)
                                .value_parser(value_parser!(f32))
                                .index(3),
                        )
                        .arg(output_arg()),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Emit default JSON payloads")
                .subcommand_required(true)
                .subcommand(Command::new("mix-json").about("Print an example mix spec")),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("FILE")
        .help("Write the result here instead of overwriting the input")
}
