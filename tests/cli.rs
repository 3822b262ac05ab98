//! End-to-end tests for the command line binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn converter() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_aab").unwrap();
    cmd.env_remove("KS_PASS")
        .env_remove("KEY_PASS")
        .env_remove("BUNDLETOOL_CACHE_DIR");
    cmd
}

#[test]
fn apk_input_passes_through_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("app.apk");
    std::fs::write(&apk, b"already an apk").unwrap();

    converter()
        .arg(&apk)
        .arg("--cache-dir")
        .arg(dir.path().join("cache"))
        .arg("--java")
        .arg(dir.path().join("no-such-java"))
        .assert()
        .success()
        .stdout(predicate::str::contains(apk.display().to_string()));

    assert_eq!(std::fs::read(&apk).unwrap(), b"already an apk");
    assert!(!dir.path().join("cache").exists());
}

#[test]
fn format_flag_forces_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("app.aab");
    std::fs::write(&bundle, b"bundle").unwrap();

    converter()
        .arg(&bundle)
        .args(["--format", "apk"])
        .assert()
        .success();

    assert_eq!(std::fs::read(&bundle).unwrap(), b"bundle");
}

#[test]
fn missing_java_reports_runtime_hint() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("app.aab");
    std::fs::write(&bundle, b"bundle").unwrap();

    converter()
        .arg(&bundle)
        .arg("--cache-dir")
        .arg(dir.path().join("cache"))
        .arg("--java")
        .arg(dir.path().join("no-such-java"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Java runtime not found"))
        .stderr(predicate::str::contains("hint:"));

    assert_eq!(std::fs::read(&bundle).unwrap(), b"bundle");
}

#[test]
fn rejects_unknown_format() {
    converter()
        .args(["app.aab", "--format", "xapk"])
        .assert()
        .failure();
}

#[test]
fn requires_bundle_argument() {
    converter()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<BUNDLE>"));
}

#[test]
fn invalid_key_size_exits_with_one() {
    converter()
        .args(["app.aab", "--keysize", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Key size"));
}

#[test]
fn unreadable_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    converter()
        .arg("app.aab")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.toml"));
}
