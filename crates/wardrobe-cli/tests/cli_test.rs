/// End-to-end tests for the `wardrobe` binary
///
/// Every test runs inside its own temporary directory so that no
/// wardrobe.toml from the surrounding tree is picked up.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const WARDROBE: &str = r#"{
    "garments": ["Shirt", "Pants", "Hat"],
    "colors": ["Red", "Blue"],
    "constraints": [
        {"type": "implies", "object": "garment", "values": [["Shirt", "Pants"]]},
        {"type": "xor", "object": "garment", "values": [["Shirt", "Hat"]]}
    ]
}"#;

fn setup(inventory: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("wardrobe.json"), WARDROBE).unwrap();
    fs::write(dir.path().join("inventory.txt"), inventory).unwrap();
    dir
}

fn wardrobe(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wardrobe"))
        .args(args)
        .current_dir(dir)
        .env_remove("WARDROBE_SOLVE_TIMEOUT_MS")
        .env_remove("WARDROBE_PARALLEL")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_dress_prints_text_lines() {
    let dir = setup("Shirt,Red\nPants,Blue\n");
    let output = wardrobe(dir.path(), &["dress", "--wardrobe", "wardrobe.json", "inventory.txt"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Shirt (Red), Pants (Blue)");
    assert!(stderr(&output).contains("Constraint \"xor\" is not defined"));
}

#[test]
fn test_dress_json_output() {
    let dir = setup("Shirt,Red\nPants,Blue\n");
    let output = wardrobe(
        dir.path(),
        &["dress", "--wardrobe", "wardrobe.json", "--format", "json", "--sequential", "inventory.txt"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let dressings = json.as_array().unwrap();
    assert_eq!(dressings.len(), 1);

    let first = &dressings[0][0];
    assert_eq!(first["garment"]["name"], "Shirt");
    assert_eq!(first["color"]["id"], 0);
    assert_eq!(first["image"], "shirt/red.png");
    assert_eq!(first["z_index"], 0);
}

#[test]
fn test_config_file_sets_format() {
    let dir = setup("Pants,Blue\n");
    fs::write(dir.path().join("wardrobe.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let output = wardrobe(dir.path(), &["dress", "-w", "wardrobe.json", "inventory.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0][0]["garment"]["name"], "Pants");
}

#[test]
fn test_missing_wardrobe_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("inventory.txt"), "Shirt,Red\n").unwrap();

    let output = wardrobe(dir.path(), &["dress", "-w", "missing.json", "inventory.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing.json"));
}

#[test]
fn test_invalid_environment_override_fails() {
    let dir = setup("Shirt,Red\n");
    let output = Command::new(env!("CARGO_BIN_EXE_wardrobe"))
        .args(["dress", "-w", "wardrobe.json", "inventory.txt"])
        .current_dir(dir.path())
        .env("WARDROBE_PARALLEL", "sometimes")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("WARDROBE_PARALLEL"));
}

#[test]
fn test_catalog_json() {
    let dir = setup("");
    let output = wardrobe(dir.path(), &["catalog", "-w", "wardrobe.json", "--json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["garments"].as_array().unwrap().len(), 3);
    assert_eq!(json["colors"][1]["name"], "Blue");
}

#[test]
fn test_check_reports_rules_and_warnings() {
    let dir = setup("");
    let output = wardrobe(dir.path(), &["check", "-w", "wardrobe.json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("3 garments, 2 colors, 1 rules, 1 warnings"));

    let strict = wardrobe(dir.path(), &["check", "-w", "wardrobe.json", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}
