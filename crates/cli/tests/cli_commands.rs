use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn world_builder(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("world-builder");
    cmd.env_remove("WORLD_BUILDER_DIR").env_remove("WORLD_BUILDER_LOG").arg("--dir").arg(dir);
    cmd
}

fn add(dir: &Path, name: &str, node_type: &str, parent: &str, notes: &str) {
    world_builder(dir)
        .args(["add", name, "-t", node_type, "-p", parent, "-n", notes])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created node"));
}

/// init should create the data directory and its README.
#[test]
fn init_creates_data_directory() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path().join("world");

    world_builder(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized data directory at"));

    assert!(dir.join("README.txt").is_file());
}

/// The Edoras/Avelon walkthrough: nesting in `tree`, filtering in `list`.
#[test]
fn add_tree_and_list_end_to_end() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();

    world_builder(dir).arg("init").assert().success();
    add(dir, "Edoras", "Continent", "-", "Eastern seas");
    add(dir, "Avelon", "Kingdom", "edoras", "Prosperous realm");

    world_builder(dir)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::eq("Edoras [Continent]\n└─ Avelon [Kingdom]\n"));

    world_builder(dir)
        .args(["list", "-t", "Kingdom"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("avelon"))
        .stdout(predicate::str::contains("[Kingdom]  parent=edoras"))
        .stdout(predicate::str::contains("[Continent]").not());
}

#[test]
fn list_json_returns_only_matching_type() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Edoras", "Continent", "-", "Eastern seas");
    add(dir, "Avelon", "Kingdom", "edoras", "Prosperous realm");

    let output = world_builder(dir).args(["list", "--type", "kingdom", "--json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = parsed.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Avelon");
    assert_eq!(items[0]["type"], "Kingdom");
    assert_eq!(items[0]["parent"], "edoras");
}

#[test]
fn list_reports_empty_world() {
    let tmp = tempdir().expect("tempdir");
    world_builder(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(no nodes)"));
}

#[test]
fn show_prints_fields() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Avelon", "Kingdom", "edoras", "Prosperous realm");

    world_builder(dir)
        .args(["show", "Avelon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:   Avelon"))
        .stdout(predicate::str::contains("Type:   Kingdom"))
        .stdout(predicate::str::contains("Parent: edoras"))
        .stdout(predicate::str::contains("Prosperous realm"));
}

#[test]
fn show_json_round_trips_notes() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Edoras", "Continent", "-", "Eastern seas");

    let output = world_builder(dir).args(["show", "edoras", "--json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["slug"], "edoras");
    assert_eq!(parsed["notes"], "Eastern seas");
    assert!(parsed["parent"].is_null());
}

#[test]
fn add_twice_without_force_fails_and_keeps_file() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Avelon", "Kingdom", "-", "original");

    world_builder(dir)
        .args(["add", "Avelon", "-t", "Duchy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to overwrite"));
    assert_eq!(fs::read_to_string(dir.join("avelon.txt")).unwrap(), "Kingdom\n-\noriginal\n");

    world_builder(dir).args(["add", "Avelon", "-t", "Duchy", "--force"]).assert().success();
    assert_eq!(fs::read_to_string(dir.join("avelon.txt")).unwrap(), "Duchy\n-\n");
}

#[test]
fn show_fails_for_missing_node() {
    let tmp = tempdir().expect("tempdir");
    world_builder(tmp.path())
        .args(["show", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node not found"));
}

#[test]
fn tree_fails_for_missing_root() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Edoras", "Continent", "-", "");
    world_builder(dir)
        .args(["tree", "--root", "atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node not found"));
}

/// A two-node parent loop must terminate in both render modes.
#[test]
fn tree_terminates_on_parent_cycle() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "A", "Realm", "b", "");
    add(dir, "B", "Realm", "a", "");

    world_builder(dir)
        .arg("tree")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Detached"))
        .stdout(predicate::str::contains("  - a (parent=b)"))
        .stdout(predicate::str::contains("  - b (parent=a)"));

    world_builder(dir)
        .args(["tree", "-r", "a"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stdout(predicate::str::contains("A [Realm]"))
        .stderr(predicate::str::contains("Parent cycle detected"));
}

#[test]
fn tree_json_includes_depths() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    add(dir, "Edoras", "Continent", "-", "");
    add(dir, "Avelon", "Kingdom", "edoras", "");

    let output = world_builder(dir).args(["tree", "--json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["depth"], 0);
    assert_eq!(entries[0]["name"], "Edoras");
    assert_eq!(entries[1]["depth"], 1);
    assert_eq!(entries[1]["name"], "Avelon");
    assert!(parsed["detached"].as_array().unwrap().is_empty());
}

#[test]
fn dir_can_come_from_environment() {
    let tmp = tempdir().expect("tempdir");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("world-builder");
    cmd.env("WORLD_BUILDER_DIR", tmp.path())
        .args(["add", "Edoras", "-t", "Continent"])
        .assert()
        .success();
    assert!(tmp.path().join("edoras.txt").is_file());
}
