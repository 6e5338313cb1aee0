//! Integration tests for the stencil binary.

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::{seed_template, stencil};

#[test]
fn help_lists_generators() {
    Command::cargo_bin("stencil")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("domain"))
        .stdout(predicate::str::contains("tool"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("stencil")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_renames_domain_and_removes_itself() {
    let tmp = TempDir::new().unwrap();
    seed_template(tmp.path());

    stencil(tmp.path())
        .arg("init")
        .write_stdin("weather-mcp\n\nweather-data\ngetForecast\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("init-project completed"))
        .stderr(predicate::str::contains("Project name (mcp-server): "));

    let root = tmp.path();
    assert!(
        root.join("src/domain/weather-data/services/weather-data.service.ts")
            .exists()
    );
    assert!(root.join("src/domain/weather-data/dtos/getForecast.dto.ts").exists());
    assert!(!root.join("src/domain/domain-name").exists());
    assert!(!root.join("scripts/init-project.ts").exists());

    let manifest = fs::read_to_string(root.join("package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"weather-mcp\""));
    assert!(manifest.contains("\"build\": \"tsc\""));
    assert!(!manifest.contains("init-project"));
}

#[test]
fn client_after_init_with_json_report() {
    let tmp = TempDir::new().unwrap();
    seed_template(tmp.path());
    stencil(tmp.path())
        .arg("init")
        .write_stdin("\n\nweather-data\n\n")
        .assert()
        .success();

    let assert = stencil(tmp.path())
        .args(["--output-format", "json", "client"])
        .write_stdin("1\n1\nopen-meteo\nget-forecast\n")
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["generator"], "new-client");
    let created: Vec<_> = report["created"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(created.contains(&"src/domain/weather-data/clients/open-meteo.http.client.ts"));
    assert!(created.contains(&"src/domain/weather-data/utils/api.utils.ts"));

    let client = fs::read_to_string(
        tmp.path()
            .join("src/domain/weather-data/clients/open-meteo.http.client.ts"),
    )
    .unwrap();
    assert!(client.contains("export class OpenMeteoHttpClient"));
    assert!(client.contains("async getForecast("));
}

#[test]
fn quiet_flag_silences_summary() {
    let tmp = TempDir::new().unwrap();
    seed_template(tmp.path());

    stencil(tmp.path())
        .args(["-q", "domain"])
        .write_stdin("billing\n\nn\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(
        tmp.path()
            .join("src/domain/billing/services/billing.service.ts")
            .exists()
    );
}

#[test]
fn shell_completions() {
    Command::cargo_bin("stencil")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}

#[test]
fn config_get_reads_project_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("stencil.toml"),
        "[project]\nmanifest = \"app/package.json\"\n",
    )
    .unwrap();

    stencil(tmp.path())
        .args(["config", "get", "project.manifest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app/package.json"));
}
