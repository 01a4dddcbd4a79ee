//! `animix mix`: build a clip file from a mix spec.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};

use animix_lib::mixer::resolver::clip_name_from_path;
use animix_lib::mixer::{mix, FileResolver, MixSpec};

use super::CliError;

/// Environment variable naming the default clip directory.
pub const CLIPS_DIR_ENV: &str = "ANIMIX_CLIPS_DIR";

/// Run the mix command and write the resulting clip.
///
/// # Errors
/// Fails when the spec cannot be read, when the asset index is unreadable,
/// when no referenced clip resolves, or when the output cannot be written.
pub fn run_mix(args: &ArgMatches) -> Result<i32, CliError> {
    let Some(spec_path) = args.get_one::<String>("SPEC") else {
        return Ok(2);
    };
    let Some(output_path) = args.get_one::<String>("OUTPUT") else {
        return Ok(2);
    };

    let spec = MixSpec::load(spec_path).map_err(|err| CliError::Spec(spec_path.clone(), err))?;
    debug!("Loaded {} source(s) from {}", spec.sources.len(), spec_path);

    let mut resolver = FileResolver::new(clips_dir(
        args.get_one::<String>("clips-dir"),
        Path::new(spec_path),
    ));
    debug!("Resolving clips against {}", resolver.base_dir().display());

    if let Some(index_path) = args.get_one::<String>("asset-index") {
        let index = FileResolver::load_asset_index(index_path).map_err(CliError::AssetIndex)?;
        resolver = resolver.with_asset_index(index);
    }

    let mut output = mix(&spec, &resolver);
    if output.report.all_unresolved() {
        return Err(CliError::NothingResolved(spec_path.clone()));
    }

    output.clip.name = clip_name_from_path(Path::new(output_path));
    output
        .clip
        .save_as(output_path, !args.get_flag("compact"))
        .map_err(|err| CliError::Clip(output_path.clone(), err))?;

    info!("Wrote {}", output_path);
    println!(
        "{}: {} curve(s), {} event(s)",
        output_path,
        output.clip.curves.len(),
        output.clip.events.len()
    );

    let mut skipped: Vec<usize> = output.warnings().iter().map(|w| w.index()).collect();
    skipped.dedup();
    if !skipped.is_empty() {
        let indices: Vec<String> = skipped.iter().map(usize::to_string).collect();
        println!("sources with warnings: {}", indices.join(", "));
    }
    Ok(0)
}

/// `--clips-dir`, else `$ANIMIX_CLIPS_DIR`, else the directory holding the spec.
fn clips_dir(flag: Option<&String>, spec_path: &Path) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var(CLIPS_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match spec_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
