//! `animix constant` and `animix info`.

use clap::ArgMatches;
use log::info;
use serde::Serialize;

use animix_lib::clip::AnimationClip;
use animix_lib::constant::{apply_constant_tangents, process_constant_clip};
use animix_lib::events::ops::time_to_frame;

use super::{output_path, CliError};

fn load(path: &str) -> Result<AnimationClip, CliError> {
    AnimationClip::load(path).map_err(|err| CliError::Clip(path.to_string(), err))
}

/// Step the curves of a constant clip and write it back.
pub fn run_constant(args: &ArgMatches) -> Result<i32, CliError> {
    let Some(input) = args.get_one::<String>("CLIP") else {
        return Ok(2);
    };
    let output = output_path(input, args.get_one::<String>("output"));

    let mut clip = load(input)?;
    let changed = if args.get_flag("force") {
        Some(apply_constant_tangents(&mut clip))
    } else {
        process_constant_clip(&mut clip)
    };

    match changed {
        None => {
            println!(
                "{}: clip {:?} is not marked CONSTANT, nothing to do (use --force)",
                input, clip.name
            );
        }
        Some(count) => {
            clip.save(output)
                .map_err(|err| CliError::Clip(output.to_string(), err))?;
            info!("Stepped {} curve(s) in {}", count, output);
            println!("{}: {} curve(s) set to constant tangents", output, count);
        }
    }
    Ok(0)
}

#[derive(Debug, Serialize)]
struct ClipSummary<'a> {
    name: &'a str,
    length: f32,
    frame_rate: f32,
    looping: bool,
    curves: Vec<CurveSummary>,
    events: Vec<EventSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct CurveSummary {
    binding: String,
    keys: usize,
    duration: f32,
}

#[derive(Debug, Serialize)]
struct EventSummary<'a> {
    time: f32,
    function_name: &'a str,
}

impl<'a> ClipSummary<'a> {
    fn new(clip: &'a AnimationClip) -> Self {
        Self {
            name: &clip.name,
            length: clip.length(),
            frame_rate: clip.frame_rate,
            looping: clip.settings.loop_time,
            curves: clip
                .curves
                .iter()
                .map(|(binding, curve)| CurveSummary {
                    binding: binding.to_string(),
                    keys: curve.len(),
                    duration: curve.duration(),
                })
                .collect(),
            events: clip
                .events
                .iter()
                .map(|event| EventSummary {
                    time: event.time,
                    function_name: &event.function_name,
                })
                .collect(),
        }
    }
}

/// Print a summary of a clip, as text or with `--json` as JSON.
pub fn run_info(args: &ArgMatches) -> Result<i32, CliError> {
    let Some(input) = args.get_one::<String>("CLIP") else {
        return Ok(2);
    };
    let clip = load(input)?;
    let summary = ClipSummary::new(&clip);

    if args.get_flag("json") {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize summary: {}", err);
                return Ok(1);
            }
        }
        return Ok(0);
    }

    println!("Name: {}", summary.name);
    println!(
        "Length: {:.3}s ({} frames at {} fps)",
        summary.length,
        time_to_frame(summary.length, summary.frame_rate),
        summary.frame_rate
    );
    println!("Loop: {}", summary.looping);
    println!("Curves: {}", summary.curves.len());
    for curve in &summary.curves {
        println!(
            "  {} ({} key(s), {:.3}s)",
            curve.binding, curve.keys, curve.duration
        );
    }
    println!("Events: {}", summary.events.len());
    for event in &summary.events {
        println!("  {:.3}s {}", event.time, event.function_name);
    }
    Ok(0)
}
