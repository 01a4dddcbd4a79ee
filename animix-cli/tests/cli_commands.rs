use std::fs;
use std::path::Path;

use animix_lib::clip::{AnimationClip, TangentMode};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const WALK: &str = r#"{
    "name": "Walk",
    "settings": { "loop_time": false },
    "curves": [
        { "path": "Root", "property": "posX",
          "keys": [ { "time": 0.0, "value": 0.0 }, { "time": 2.0, "value": 4.0 } ] }
    ],
    "events": [ { "time": 0.75, "function_name": "Step" } ]
}"#;

const WAVE: &str = r#"{
    "name": "Wave",
    "curves": [
        { "path": "Arm", "property": "rotZ",
          "keys": [ { "time": 0.0, "value": 0.0 }, { "time": 1.0, "value": 45.0 } ] },
        { "path": "Root", "property": "posX",
          "keys": [ { "time": 0.0, "value": 9.0 }, { "time": 1.0, "value": 9.0 } ] }
    ],
    "events": [ { "time": 0.5, "function_name": "Wave" } ]
}"#;

fn animix() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("animix"));
    cmd.env_remove("RUST_LOG").env_remove("ANIMIX_CLIPS_DIR");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.display().to_string()
}

#[test]
fn create_mix_json_prints_example_spec() {
    animix()
        .args(["create", "mix-json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Loop\""))
        .stdout(predicate::str::contains("\"Animations\""))
        .stdout(predicate::str::contains("\"MatchTime\""))
        .stdout(predicate::str::contains("\"CopyEvents\""));
}

#[test]
fn mix_writes_combined_clip() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "walk.clip.json", WALK);
    write(dir.path(), "wave.clip.json", WAVE);
    let spec = write(
        dir.path(),
        "combo.mix.json",
        r#"{
            "Loop": true,
            "Animations": [
                { "Animation": "walk.clip.json", "CopyEvents": true },
                { "Animation": "wave.clip.json", "Filter": "^Arm", "Path": "Rig", "MatchTime": true }
            ]
        }"#,
    );
    let output = dir.path().join("out").join("combo.clip.json");

    animix()
        .args(["mix", &spec, &output.display().to_string()])
        .assert()
        .success();

    let clip = AnimationClip::load(&output).expect("load mixed clip");
    assert_eq!(clip.name, "combo");
    assert!(clip.settings.loop_time);
    assert_eq!(clip.curves.len(), 2);
    assert_eq!(clip.curve("Root", "posX").map(|c| c.keys[1].value), Some(4.0));
    assert_eq!(clip.curve("Rig/Arm", "rotZ").map(|c| c.duration()), Some(2.0));
    assert_eq!(clip.events.len(), 1);
    assert_eq!(clip.events[0].function_name, "Step");
}

#[test]
fn mix_resolves_against_clips_dir() {
    let dir = tempdir().expect("tempdir");
    let clips = dir.path().join("clips");
    fs::create_dir_all(&clips).expect("clips dir");
    write(&clips, "walk.clip.json", WALK);
    let spec = write(
        dir.path(),
        "walk.mix.json",
        r#"{ "Animations": [ { "Animation": "walk.clip.json" } ] }"#,
    );
    let output = dir.path().join("walk_out.clip.json");

    animix()
        .args(["mix", &spec, &output.display().to_string(), "--compact"])
        .arg("--clips-dir")
        .arg(&clips)
        .assert()
        .success();

    let text = fs::read_to_string(&output).expect("read output");
    assert!(!text.contains('\n'));
    let clip = AnimationClip::from_json_str(&text).expect("parse output");
    assert!(!clip.settings.loop_time);
    assert!(clip.events.is_empty());
}

#[test]
fn mix_fails_on_unreadable_spec() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.clip.json");
    animix()
        .args([
            "mix",
            &dir.path().join("missing.mix.json").display().to_string(),
            &output.display().to_string(),
        ])
        .assert()
        .failure();
    assert!(!output.exists());

    let spec = write(dir.path(), "broken.mix.json", "{ \"Loop\": ");
    animix()
        .args(["mix", &spec, &output.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.mix.json"));
}

#[test]
fn quiet_still_reports_fatal_errors() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.clip.json");
    animix()
        .args([
            "-q",
            "mix",
            &dir.path().join("missing.mix.json").display().to_string(),
            &output.display().to_string(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.mix.json"));
}

#[test]
fn quiet_hides_source_warnings() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "walk.clip.json", WALK);
    let spec = write(
        dir.path(),
        "holes.mix.json",
        r#"{ "Animations": [
            { "Animation": null },
            { "Animation": "walk.clip.json" },
            { "Animation": "ghost.clip.json" }
        ] }"#,
    );
    let output = dir.path().join("holes.clip.json");

    animix()
        .args(["mix", &spec, &output.display().to_string(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 curve(s), 0 event(s)"))
        .stdout(predicate::str::contains("sources with warnings: 0, 2"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn mix_fails_when_nothing_resolves() {
    let dir = tempdir().expect("tempdir");
    let spec = write(
        dir.path(),
        "ghost.mix.json",
        r#"{ "Animations": [ { "Animation": "ghost.clip.json" }, { "Animation": null } ] }"#,
    );
    let output = dir.path().join("ghost_out.clip.json");

    animix()
        .args(["mix", &spec, &output.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be resolved"));
    assert!(!output.exists());
}

#[test]
fn mix_of_empty_spec_writes_empty_clip() {
    let dir = tempdir().expect("tempdir");
    let spec = write(dir.path(), "empty.mix.json", "{}");
    let output = dir.path().join("empty.clip.json");

    animix()
        .args(["mix", &spec, &output.display().to_string()])
        .assert()
        .success();

    let clip = AnimationClip::load(&output).expect("load empty clip");
    assert!(clip.curves.is_empty());
    assert!(clip.events.is_empty());
}

#[test]
fn constant_steps_marked_clip() {
    let dir = tempdir().expect("tempdir");
    let input = write(
        dir.path(),
        "door.clip.json",
        r#"{ "name": "Door_CONSTANT", "curves": [
            { "path": "Door", "property": "rotY",
              "keys": [ { "time": 0.0, "value": 0.0 }, { "time": 1.0, "value": 90.0 } ] }
        ] }"#,
    );

    animix()
        .args(["constant", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 curve(s)"));

    let clip = AnimationClip::load(&input).expect("load stepped clip");
    let curve = clip.curve("Door", "rotY").expect("rotY curve");
    assert!(curve.keys.iter().all(|key| key.out_mode == TangentMode::Constant));
}

#[test]
fn constant_skips_unmarked_clip_without_force() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);
    let output = dir.path().join("stepped.clip.json");

    animix()
        .args(["constant", &input, "--output", &output.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("not marked CONSTANT"));
    assert!(!output.exists());

    animix()
        .args(["constant", &input, "--force", "--output", &output.display().to_string()])
        .assert()
        .success();
    let clip = AnimationClip::load(&output).expect("load forced clip");
    let curve = clip.curve("Root", "posX").expect("posX curve");
    assert_eq!(curve.keys[0].in_mode, TangentMode::Constant);
}

#[test]
fn info_prints_clip_summary() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);

    animix()
        .args(["info", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Walk"))
        .stdout(predicate::str::contains("Length: 2.000s"))
        .stdout(predicate::str::contains("Root:posX"))
        .stdout(predicate::str::contains("Step"));
}

#[test]
fn info_json_is_machine_readable() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);

    let assert = animix().args(["info", &input, "--json"]).assert().success();
    let summary: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("summary json");
    assert_eq!(summary["name"], "Walk");
    assert_eq!(summary["length"], 2.0);
    assert_eq!(summary["looping"], false);
    assert_eq!(summary["curves"][0]["binding"], "Root:posX");
    assert_eq!(summary["curves"][0]["keys"], 2);
    assert_eq!(summary["events"][0]["function_name"], "Step");
}

#[test]
fn events_shift_clamps_to_clip() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);

    animix()
        .args(["events", "shift", &input, "-1.5"])
        .assert()
        .success();
    let clip = AnimationClip::load(&input).expect("load shifted clip");
    assert_eq!(clip.events[0].time, 0.0);

    animix()
        .args(["events", "shift", &input, "5"])
        .assert()
        .success();
    let clip = AnimationClip::load(&input).expect("load shifted clip");
    assert_eq!(clip.events[0].time, 2.0);
}

#[test]
fn events_paste_rebases_clipboard() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);
    let clipboard = write(
        dir.path(),
        "clipboard.json",
        r#"{ "Events": [
            { "FunctionName": "Left", "Time": 1.0 },
            { "FunctionName": "Right", "Time": 1.5, "IntParameter": 2 }
        ] }"#,
    );
    let output = dir.path().join("pasted.clip.json");

    animix()
        .args([
            "events",
            "paste",
            &input,
            &clipboard,
            "0.25",
            "--output",
            &output.display().to_string(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pasted 2 event(s)"));

    let clip = AnimationClip::load(&output).expect("load pasted clip");
    let times: Vec<(String, f32)> = clip
        .events
        .iter()
        .map(|event| (event.function_name.clone(), event.time))
        .collect();
    assert_eq!(
        times,
        vec![
            ("Step".to_string(), 0.75),
            ("Left".to_string(), 0.25),
            ("Right".to_string(), 0.75),
        ]
    );
    assert_eq!(clip.events[2].int_parameter, 2);
}

#[test]
fn events_paste_accepts_negative_time() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);
    let clipboard = write(
        dir.path(),
        "clipboard.json",
        r#"{ "Events": [ { "FunctionName": "Early", "Time": 1.0 } ] }"#,
    );

    animix()
        .args(["events", "paste", &input, &clipboard, "-0.5"])
        .assert()
        .success();

    let clip = AnimationClip::load(&input).expect("load pasted clip");
    assert_eq!(clip.events[1].function_name, "Early");
    assert_eq!(clip.events[1].time, -0.5);
}

#[test]
fn events_paste_rejects_empty_clipboard() {
    let dir = tempdir().expect("tempdir");
    let input = write(dir.path(), "walk.clip.json", WALK);
    let clipboard = write(dir.path(), "clipboard.json", r#"{ "Events": [] }"#);

    animix()
        .args(["events", "paste", &input, &clipboard, "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}
