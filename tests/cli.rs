//! End-to-end runs of the `chanplot` binary against generated sample files.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write interleaved little-endian i16 frames for two channels: a ramp and its negation.
fn write_stereo_i16(path: &Path, frames: usize) {
    let bytes: Vec<u8> = (0..frames as i16)
        .flat_map(|i| [i, -i])
        .flat_map(|v| v.to_le_bytes())
        .collect();
    fs::write(path, bytes).expect("failed to write sample file");
}

#[test]
fn plots_selected_channel_to_png() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let output = dir.path().join("out.png");
    write_stereo_i16(&input, 1000);

    Command::cargo_bin("chanplot")
        .unwrap()
        .arg(&input)
        .args(["--channels", "2", "--encoding", "i16le", "--channel", "1"])
        .args(["--width", "120", "--height", "60", "--json"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sample_count\": 1000"))
        .stdout(predicate::str::contains("\"downsampled\": true"));

    let png = fs::read(&output).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn config_file_supplies_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let config = dir.path().join("plot.json");
    let output = dir.path().join("out.png");
    write_stereo_i16(&input, 10);
    fs::write(
        &config,
        r#"{ "format": { "encoding": "i16le", "channel_count": 2 }, "style": { "width": 50, "height": 20 } }"#,
    )
    .unwrap();

    Command::cargo_bin("chanplot")
        .unwrap()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"points_drawn\": 10"));
}

#[test]
fn out_of_range_channel_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    write_stereo_i16(&input, 4);

    Command::cargo_bin("chanplot")
        .unwrap()
        .arg(&input)
        .args(["--channels", "2", "--channel", "5"])
        .arg("--output")
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("channel index 5 is out of range"));
}

#[test]
fn truncated_file_warns_but_succeeds() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("odd.bin");
    fs::write(&input, [1u8, 0, 2, 0, 3]).unwrap();

    Command::cargo_bin("chanplot")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.png"))
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("truncated_input"))
        .stderr(predicate::str::contains("trailing byte"));
}

#[test]
fn missing_input_reports_path() {
    Command::cargo_bin("chanplot")
        .unwrap()
        .arg("/definitely/not/here.bin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read /definitely/not/here.bin"));
}
