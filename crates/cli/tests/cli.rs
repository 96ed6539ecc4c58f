//! Tests for the `eazysvn` binary that need no Subversion repository.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with an empty config directory, so a developer's own
/// config file cannot leak into the tests.
fn eazysvn(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eazysvn").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_prints_command_list() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: eazysvn command arguments"))
        .stdout(predicate::str::contains("merge       -- merge branches (aka ezmerge)"));
}

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rmbranch    -- remove branches"));
}

#[test]
fn test_long_help_flag() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subversion"));
}

#[test]
fn test_subcommand_help() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["mvbranch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rename branches"));
}

#[test]
fn test_subcommand_help_mentions_no_argument_form() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["switch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("switch to a different branch"))
        .stdout(predicate::str::contains("prints the URL of the current branch"));
}

#[test]
fn test_bogus_log_level_is_rejected() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["--log-level", "chatty", "selftest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chatty"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("eazysvn "));
}

#[test]
fn test_selftest() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .arg("selftest")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 18 tests passed."));
}

#[test]
fn test_unknown_command() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .arg("blargh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("blargh"));
}

#[test]
fn test_too_few_arguments() {
    let home = TempDir::new().unwrap();
    for command in ["merge", "revert", "tag", "rmbranch", "mvbranch"] {
        eazysvn(&home)
            .arg(command)
            .assert()
            .failure()
            .stderr(predicate::str::contains("required"));
    }
}

#[test]
fn test_revert_all_is_refused() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["revert", "ALL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "I refuse to revert all checkins in a branch",
        ));
}

#[test]
fn test_revert_empty_range() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["revert", "-n", "42-41"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty range (42-41)"));
}

#[test]
fn test_missing_explicit_config() {
    let home = TempDir::new().unwrap();
    eazysvn(&home)
        .args(["--config", "/nonexistent/eazysvn.toml", "revert", "43"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_invalid_config_value() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "[svn]\nbinary = \"\"\n").unwrap();
    eazysvn(&home)
        .arg("--config")
        .arg(&path)
        .args(["revert", "43"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("svn.binary"));
}

#[test]
fn test_alias_program_name() {
    let home = TempDir::new().unwrap();
    let bin = assert_cmd::cargo::cargo_bin("eazysvn");
    let alias = home.path().join(format!("ezmerge{}", std::env::consts::EXE_SUFFIX));
    std::fs::copy(&bin, &alias).unwrap();

    Command::new(&alias)
        .env("XDG_CONFIG_HOME", home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge branches"));
}
