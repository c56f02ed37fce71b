use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

fn write_sample_fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("sample.md");
    let mut file = std::fs::File::create(&path).expect("create fixture");
    write!(file, "- First point\n- Second point\n\nClosing paragraph.\n").expect("write fixture");
    path
}

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sample_fixture(&dir);

    let mut cmd = cargo_bin_cmd!("mdmend");
    cmd.arg("inspect").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("⧉ Document").and(predicate::str::contains("☰")));
}

#[test]
fn inspect_ast_json_outputs_typed_nodes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sample_fixture(&dir);

    let mut cmd = cargo_bin_cmd!("mdmend");
    cmd.arg("inspect").arg(&path).arg("ast-json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"list\""));
}

#[test]
fn inspect_rejects_unknown_transform() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_sample_fixture(&dir);

    let mut cmd = cargo_bin_cmd!("mdmend");
    cmd.arg("inspect").arg(&path).arg("ast-bogus");

    cmd.assert().failure();
}

#[test]
fn list_transforms_names_all_outputs() {
    let mut cmd = cargo_bin_cmd!("mdmend");
    cmd.arg("--list-transforms");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ast-treeviz").and(predicate::str::contains("ast-json")));
}

#[test]
fn missing_file_reports_read_error() {
    let mut cmd = cargo_bin_cmd!("mdmend");
    cmd.arg("inspect").arg("does-not-exist.md");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}
