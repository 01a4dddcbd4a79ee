//! Command implementations behind the `animix` subcommands.

use std::fmt::{Display, Formatter};

use animix_lib::clip::ClipFileError;
use animix_lib::events::ClipboardError;
use animix_lib::mixer::{ResolveError, SpecError};

pub mod args;
pub mod clip;
pub mod create;
pub mod events;
pub mod mix;

/// Failure of a CLI command. Each variant carries the path it concerns.
#[derive(Debug)]
pub enum CliError {
    Spec(String, SpecError),
    Clip(String, ClipFileError),
    AssetIndex(ResolveError),
    Clipboard(String, ClipboardError),
    Io(String, std::io::Error),
    /// Every source that named a clip failed to resolve.
    NothingResolved(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spec(path, err) => write!(f, "{}: {}", path, err),
            Self::Clip(path, err) => write!(f, "{}: {}", path, err),
            Self::AssetIndex(err) => write!(f, "asset index: {}", err),
            Self::Clipboard(path, err) => write!(f, "{}: {}", path, err),
            Self::Io(path, err) => write!(f, "{}: {}", path, err),
            Self::NothingResolved(path) => {
                write!(f, "{}: none of the referenced clips could be resolved", path)
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Destination for an edited clip: `--output` if given, else the input itself.
pub(crate) fn output_path<'a>(input: &'a str, output: Option<&'a String>) -> &'a str {
    output.map(String::as_str).unwrap_or(input)
}
