//! `animix events`: batch edits through an event session.

use clap::ArgMatches;
use log::info;

use animix_lib::clip::AnimationClip;
use animix_lib::events::{EventClipboard, EventEditSession};

use super::{output_path, CliError};

pub fn run_events(args: &ArgMatches) -> Result<i32, CliError> {
    match args.subcommand() {
        Some(("shift", sub)) => run_shift(sub),
        Some(("paste", sub)) => run_paste(sub),
        _ => Ok(2),
    }
}

fn run_shift(args: &ArgMatches) -> Result<i32, CliError> {
    let (Some(input), Some(delta)) = (
        args.get_one::<String>("CLIP"),
        args.get_one::<f32>("DELTA").copied(),
    ) else {
        return Ok(2);
    };
    let output = output_path(input, args.get_one::<String>("output"));

    let mut clip = load(input)?;
    let mut session = EventEditSession::from_clip(&clip);
    session.select_all();
    let moved = session.offset_selected(delta);

    save(&mut session, &mut clip, output)?;
    println!("{}: shifted {} event(s) by {}s", output, moved, delta);
    Ok(0)
}

fn run_paste(args: &ArgMatches) -> Result<i32, CliError> {
    let (Some(input), Some(clipboard_path), Some(time)) = (
        args.get_one::<String>("CLIP"),
        args.get_one::<String>("CLIPBOARD"),
        args.get_one::<f32>("TIME").copied(),
    ) else {
        return Ok(2);
    };
    let output = output_path(input, args.get_one::<String>("output"));

    let text = std::fs::read_to_string(clipboard_path)
        .map_err(|err| CliError::Io(clipboard_path.clone(), err))?;
    let clipboard = EventClipboard::from_json(&text)
        .map_err(|err| CliError::Clipboard(clipboard_path.clone(), err))?;

    let mut clip = load(input)?;
    let mut session = EventEditSession::from_clip(&clip);
    let pasted = session.paste(&clipboard, time);

    save(&mut session, &mut clip, output)?;
    println!("{}: pasted {} event(s) at {}s", output, pasted.len(), time);
    Ok(0)
}

fn load(path: &str) -> Result<AnimationClip, CliError> {
    AnimationClip::load(path).map_err(|err| CliError::Clip(path.to_string(), err))
}

fn save(
    session: &mut EventEditSession,
    clip: &mut AnimationClip,
    output: &str,
) -> Result<(), CliError> {
    session.apply_to(clip);
    clip.save(output)
        .map_err(|err| CliError::Clip(output.to_string(), err))?;
    info!("Wrote {} event(s) to {}", clip.events.len(), output);
    Ok(())
}
