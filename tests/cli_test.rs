//! Binary-level tests for the `polecalc` command.

use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn polecalc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_polecalc"))
}

const JOB: &str = indoc! {r#"
    {
        "poleHeight": "40ft",
        "existingPowerHeight": "35ft 0in",
        "voltageClass": "distribution",
        "spanEnvironment": "road",
        "spanDistance": 150,
        "adjacentPoleHeight": 40,
        "existingLines": [
            {"type": "communication", "height": "27ft", "companyName": "FirstEnergy",
             "makeReady": true, "makeReadyHeight": "26ft"}
        ]
    }
"#};

#[test]
fn analyze_writes_json_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("job.json");
    let output_path = temp_dir.path().join("outcome.json");
    fs::write(&input_path, JOB).unwrap();

    polecalc()
        .current_dir(temp_dir.path())
        .args(["analyze", "--format", "json", "--output"])
        .arg(&output_path)
        .arg(&input_path)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["results"]["attach"]["effectiveSeparationInches"], 44);
    assert_eq!(json["results"]["makeReadyTotal"], 150.0);
}

#[test]
fn analyze_reads_stdin_and_fails_on_rejected_input() {
    let temp_dir = TempDir::new().unwrap();
    let output = polecalc()
        .current_dir(temp_dir.path())
        .args(["analyze", "-f", "json", "-"])
        .write_stdin(r#"{"existingPowerHeight": 35}"#)
        .assert()
        .failure()
        .get_output()
        .clone();

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ok"], false);
    assert!(json["errors"]["poleHeight"].is_string());
}

#[test]
fn preset_flag_overrides_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("job.json");
    fs::write(&input_path, r#"{"poleHeight": 40, "existingPowerHeight": 35}"#).unwrap();

    let output = polecalc()
        .current_dir(temp_dir.path())
        .args(["analyze", "-f", "json", "--preset", "monPower"])
        .arg(&input_path)
        .assert()
        .success()
        .get_output()
        .clone();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"]["attach"]["firstEnergy"], true);
}

#[test]
fn profile_file_is_layered_in() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("job.json");
    let profile_path = temp_dir.path().join("dot.toml");
    fs::write(
        &input_path,
        r#"{"poleHeight": 40, "existingPowerHeight": 35, "spanEnvironment": "highway"}"#,
    )
    .unwrap();
    fs::write(
        &profile_path,
        indoc! {r#"
            name = "State DOT"
            min_top_space_ft = 2.5

            [ground_targets]
            highway = 20.0
        "#},
    )
    .unwrap();

    let output = polecalc()
        .current_dir(temp_dir.path())
        .args(["analyze", "-f", "json", "--profile"])
        .arg(&profile_path)
        .arg(&input_path)
        .assert()
        .success()
        .get_output()
        .clone();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"]["clearances"]["groundClearance"], 20.0);
    assert_eq!(json["results"]["clearances"]["minimumPoleTopSpace"], 2.5);
}

#[test]
fn project_config_supplies_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".polecalc.toml"),
        indoc! {r#"
            [defaults]
            preset = "penelec"
            wind_speed = 60.0
        "#},
    )
    .unwrap();
    let input_path = temp_dir.path().join("job.json");
    fs::write(
        &input_path,
        r#"{"poleHeight": 40, "existingPowerHeight": 35, "spanDistance": 100, "adjacentPoleHeight": 40}"#,
    )
    .unwrap();

    let output = polecalc()
        .current_dir(temp_dir.path())
        .args(["analyze", "-f", "json"])
        .arg(&input_path)
        .assert()
        .success()
        .get_output()
        .clone();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"]["attach"]["firstEnergy"], true);
    assert_eq!(json["results"]["span"]["wind"], 60.0);
}

#[test]
fn format_command_prints_feet_and_inches() {
    polecalc()
        .args(["format", "42.92"])
        .assert()
        .success()
        .stdout("42' 11\"\n");

    polecalc()
        .args(["format", "--verbose", "6in"])
        .assert()
        .success()
        .stdout("0ft 6in\n");

    polecalc().args(["format", "abc"]).assert().failure();
}

#[test]
fn catalog_commands_list_entries() {
    let presets = polecalc().arg("presets").assert().success().get_output().clone();
    assert!(String::from_utf8_lossy(&presets.stdout).contains("westPennPower"));

    let cables = polecalc().arg("cables").assert().success().get_output().clone();
    assert!(String::from_utf8_lossy(&cables.stdout).contains("adss-144"));
}
