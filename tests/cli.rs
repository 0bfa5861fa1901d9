use assert_cmd::prelude::*;
use predicates::str::{contains, is_empty};
use std::process::Command;
use tempfile::TempDir;

fn jkvs(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jkvs").unwrap();
    cmd.current_dir(temp_dir);
    cmd
}

#[test]
fn cli_no_args() {
    Command::cargo_bin("jkvs").unwrap().assert().failure();
}

#[test]
fn cli_version() {
    Command::cargo_bin("jkvs")
        .unwrap()
        .args(&["-V"])
        .assert()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_get_missing_key() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");

    jkvs(&temp_dir)
        .args(&["get", "key1"])
        .assert()
        .success()
        .stdout("Key not found\n");
}

#[test]
fn cli_set_then_get() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");

    jkvs(&temp_dir)
        .args(&["set", "todos", r#"[{"id":1,"text":"buy milk","done":false}]"#])
        .assert()
        .success()
        .stdout(is_empty());

    jkvs(&temp_dir)
        .args(&["get", "todos"])
        .assert()
        .success()
        .stdout(contains(r#""text": "buy milk""#));
}

#[test]
fn cli_set_rejects_invalid_json() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");

    jkvs(&temp_dir)
        .args(&["set", "key1", "{not valid"])
        .assert()
        .failure()
        .stdout(contains("Not valid JSON"));

    jkvs(&temp_dir)
        .args(&["get", "key1"])
        .assert()
        .success()
        .stdout("Key not found\n");
}

#[test]
fn cli_rm() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");

    jkvs(&temp_dir)
        .args(&["set", "key1", "\"value1\""])
        .assert()
        .success();

    jkvs(&temp_dir).args(&["rm", "key1"]).assert().success();

    jkvs(&temp_dir)
        .args(&["rm", "key1"])
        .assert()
        .failure()
        .stdout("Key not found\n");
}

#[test]
fn cli_dir_and_quota() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");
    let data_dir = TempDir::new().expect("unable to create temporary data directory");
    let dir = data_dir.path().to_str().unwrap();

    jkvs(&temp_dir)
        .args(&["--dir", dir, "--quota", "8", "set", "k", "\"too long\""])
        .assert()
        .failure()
        .stdout(contains("Quota exceeded"));

    jkvs(&temp_dir)
        .args(&["--dir", dir, "set", "k", "1"])
        .assert()
        .success();

    jkvs(&temp_dir)
        .args(&["--dir", dir, "get", "k"])
        .assert()
        .success()
        .stdout("1\n");

    jkvs(&temp_dir)
        .args(&["get", "k"])
        .assert()
        .success()
        .stdout("Key not found\n");
}

#[test]
fn cli_invalid_quota() {
    let temp_dir = TempDir::new().expect("unable to create temporary working directory");

    jkvs(&temp_dir)
        .args(&["--quota", "lots", "get", "k"])
        .assert()
        .failure()
        .stdout(contains("Quota must be a number of bytes"));
}
