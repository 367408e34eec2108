use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TARGET: &str = "/tempZone/home/rods/foo.h5";

fn gridprobe(path_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gridprobe").unwrap();
    cmd.env_remove("RUST_LOG").env("PATH", path_dir);
    cmd
}

#[cfg(unix)]
fn stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn no_arguments_prints_usage_and_exits_zero() {
    let dir = TempDir::new().unwrap();

    gridprobe(dir.path())
        .assert()
        .success()
        .stdout("gridprobe filename\n")
        .stderr("");
}

#[test]
fn missing_client_still_exits_zero_with_trace() {
    let dir = TempDir::new().unwrap();

    gridprobe(dir.path())
        .arg(TARGET)
        .assert()
        .code(0)
        .stdout("")
        .stderr(contains("Failed to open \"/tempZone/home/rods/foo.h5\""))
        .stderr(contains("Caused by:"))
        .stderr(contains("Failed to execute iinit"));
}

#[cfg(unix)]
#[test]
fn usage_path_never_touches_the_client() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("calls");
    let body = format!("echo \"$0\" >> {}", record.display());
    stub(dir.path(), "iinit", &body);
    stub(dir.path(), "ils", &body);

    gridprobe(dir.path()).assert().success();

    assert!(!record.exists());
}

#[cfg(unix)]
#[test]
fn successful_open_is_silent_and_resolves_once() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("calls");
    stub(dir.path(), "iinit", &format!("echo \"iinit\" >> {}", record.display()));
    stub(
        dir.path(),
        "ils",
        &format!("echo \"ils $2\" >> {}", record.display()),
    );

    gridprobe(dir.path())
        .arg(TARGET)
        .arg("ignored-extra")
        .assert()
        .success()
        .stdout("")
        .stderr("");

    let calls = fs::read_to_string(&record).unwrap();
    assert_eq!(calls, format!("iinit\nils {}\n", TARGET));
}

#[cfg(unix)]
#[test]
fn rejected_login_exits_zero_with_client_message() {
    let dir = TempDir::new().unwrap();
    stub(
        dir.path(),
        "iinit",
        "echo 'CAT_INVALID_AUTHENTICATION' >&2; exit 3",
    );
    stub(dir.path(), "ils", "exit 0");

    gridprobe(dir.path())
        .arg(TARGET)
        .assert()
        .success()
        .stderr(contains("Login to rods@localhost:1247 failed"))
        .stderr(contains("CAT_INVALID_AUTHENTICATION"));
}

#[cfg(unix)]
#[test]
fn debug_logging_comes_from_rust_log() {
    let dir = TempDir::new().unwrap();
    stub(dir.path(), "iinit", "exit 0");
    stub(dir.path(), "ils", "echo 'ils: does not exist' >&2; exit 4");

    gridprobe(dir.path())
        .env("RUST_LOG", "gridprobe=debug")
        .arg(TARGET)
        .assert()
        .success()
        .stderr(contains("Binding"))
        .stderr(contains("\"password\":\"********\""))
        .stderr(contains("Releasing handle"))
        .stderr(contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn dash_leading_target_is_opened_once() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("calls");
    stub(dir.path(), "iinit", "exit 0");
    stub(
        dir.path(),
        "ils",
        &format!("echo \"ils $2\" >> {}", record.display()),
    );

    gridprobe(dir.path())
        .args(["-foo.h5", "--help"])
        .assert()
        .code(0)
        .stdout("")
        .stderr("");

    assert_eq!(fs::read_to_string(&record).unwrap(), "ils ./-foo.h5\n");
}

#[test]
fn flag_shaped_targets_are_opened_not_interpreted() {
    for target in ["-v", "--help", "--version", "--"] {
        let dir = TempDir::new().unwrap();

        gridprobe(dir.path())
            .arg(target)
            .assert()
            .code(0)
            .stdout("")
            .stderr(contains("Failed to open"))
            .stderr(contains("Failed to execute iinit"));
    }
}
