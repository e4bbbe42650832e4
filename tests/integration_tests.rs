use std::fs;
use std::process::{Command, Output};

const CARS: &str = "tests/data/cars.csv";

/// Run the starscatter binary with the given arguments
fn run_starscatter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_starscatter"))
        .args(args)
        .output()
        .expect("Failed to spawn starscatter")
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

#[test]
fn test_end_to_end_svg_chart_to_stdout() {
    let output = run_starscatter(&[CARS]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Car models: Horsepower vs. Price"));
    assert!(svg.matches("<circle").count() >= 10);
}

#[test]
fn test_end_to_end_png_chart() {
    let output = run_starscatter(&[CARS, "--format", "png"]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(is_valid_png(&output.stdout), "Output is not a valid PNG");
}

#[test]
fn test_end_to_end_click_fills_panel_and_starplot() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("chart.svg");
    let star = dir.path().join("star.svg");
    let panel = dir.path().join("panel.txt");

    let output = run_starscatter(&[
        CARS,
        "--events",
        "hover(2) | wait(120) | click(2)",
        "--output",
        chart.to_str().unwrap(),
        "--starplot",
        star.to_str().unwrap(),
        "--panel",
        panel.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let chart = fs::read_to_string(chart).unwrap();
    assert!(chart.contains("BMW M3 coupe 2dr"), "tooltip missing");

    let star = fs::read_to_string(star).unwrap();
    assert!(star.contains("<polygon"));
    assert!(star.contains("Engine Size"));
    assert!(!star.contains("Select a point"));

    let panel = fs::read_to_string(panel).unwrap();
    assert!(panel.starts_with("[#1f77b4] Sedan\n"));
    assert!(panel.contains("Name: BMW M3 coupe 2dr\n"));
    assert!(panel.contains("Horsepower(HP): 333\n"));
}

#[test]
fn test_end_to_end_missing_values_use_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let panel = dir.path().join("panel.txt");
    let output = run_starscatter(&[
        CARS,
        "--events",
        "click(9)",
        "--output",
        dir.path().join("chart.svg").to_str().unwrap(),
        "--panel",
        panel.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    let panel = fs::read_to_string(panel).unwrap();
    assert!(panel.contains("City Miles Per Gallon: N/A\n"));
    assert!(panel.contains("Highway Miles Per Gallon: N/A\n"));
}

#[test]
fn test_end_to_end_clear_restores_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let star = dir.path().join("star.svg");
    let output = run_starscatter(&[
        CARS,
        "--events",
        "click(0) | clear()",
        "--output",
        dir.path().join("chart.svg").to_str().unwrap(),
        "--starplot",
        star.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    let star = fs::read_to_string(star).unwrap();
    assert!(star.contains("Select a point"));
    assert!(!star.contains("<polygon"));
}

#[test]
fn test_end_to_end_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{ "title": "Weight vs. Length", "x_attr": "Len", "y_attr": "Weight",
            "extra_numeric": ["Len", "Weight"], "chart": { "width": 640, "height": 400 } }"#,
    )
    .unwrap();

    let output = run_starscatter(&[CARS, "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains("Weight vs. Length"));
    assert!(svg.contains("640"));
}

#[test]
fn test_error_missing_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let output = run_starscatter(&[missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains("<svg"), "empty chart surface expected");
    assert!(!svg.contains("<circle"), "no partial chart expected");
    assert!(!svg.contains("<text"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("failed to load data").count(), 1);
}

#[test]
fn test_error_missing_data_file_writes_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let chart = dir.path().join("chart.svg");
    let output = run_starscatter(&[
        dir.path().join("missing.csv").to_str().unwrap(),
        "--output",
        chart.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let svg = fs::read_to_string(chart).unwrap();
    assert!(svg.contains("800"));
    assert!(!svg.contains("<circle"));
}

#[test]
fn test_error_bad_script() {
    let output = run_starscatter(&[CARS, "--events", "click(1) | zoom(2)"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parse error"));
}

#[test]
fn test_unknown_index_is_ignored() {
    let output = run_starscatter(&[CARS, "--events", "click(500)"]);
    assert!(output.status.success(), "Failed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("<svg"));
}
