//! End-to-end tests against a real Subversion repository.
//!
//! These tests use:
//! - A local repository created via `svnadmin create` (file:// protocol)
//! - The real `SvnClient` running the `svn` binary
//!
//! Tests skip gracefully if `svn` / `svnadmin` are not installed.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use eazysvn_core::{CommandEngine, ListKind, SvnClient, SvnRunner, SwitchRequest};

// ===========================================================================
// Helpers
// ===========================================================================

fn svn_available() -> bool {
    let svn_ok = Command::new("svn")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);

    let svnadmin_ok = Command::new("svnadmin")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);

    svn_ok && svnadmin_ok
}

fn svn(args: &[&str]) {
    let status = Command::new("svn")
        .args(args)
        .arg("--non-interactive")
        .stdout(std::process::Stdio::null())
        .status()
        .expect("failed to run svn");
    assert!(status.success(), "svn {:?} failed", args);
}

/// Create a repository with the standard layout and return its URL.
fn create_svn_repo(dir: &Path) -> String {
    let repo_dir = dir.join("svn_repo");
    let status = Command::new("svnadmin")
        .args(["create", repo_dir.to_str().unwrap()])
        .status()
        .expect("failed to run svnadmin create");
    assert!(status.success(), "svnadmin create failed");

    let url = format!("file://{}", repo_dir.display());
    svn(&[
        "mkdir",
        "-m",
        "standard layout",
        &format!("{}/trunk", url),
        &format!("{}/branches", url),
        &format!("{}/tags", url),
    ]);
    url
}

fn checkout(url: &str, dest: &Path) -> String {
    let dest = dest.to_str().unwrap().to_string();
    svn(&["checkout", url, &dest]);
    dest
}

macro_rules! require_svn {
    () => {
        if !svn_available() {
            eprintln!("svn/svnadmin not available, skipping");
            return;
        }
    };
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn test_info_of_checkout() {
    require_svn!();
    let dir = TempDir::new().unwrap();
    let url = create_svn_repo(dir.path());
    let wc = checkout(&format!("{}/trunk", url), &dir.path().join("wc"));

    let engine = CommandEngine::new(SvnClient::default(), Vec::new());
    let current = engine.current_branch(&wc).unwrap();

    assert_eq!(current.to_string(), format!("{}/trunk", url));
}

#[test]
fn test_log_is_xml() {
    require_svn!();
    let dir = TempDir::new().unwrap();
    let url = create_svn_repo(dir.path());

    let xml = SvnClient::default().log(&url, true).unwrap();
    assert!(xml.starts_with("<?xml"));
}

#[test]
fn test_create_branch_then_list_and_find_branch_point() {
    require_svn!();
    let dir = TempDir::new().unwrap();
    let url = create_svn_repo(dir.path());
    let wc = checkout(&format!("{}/trunk", url), &dir.path().join("wc"));

    let mut engine = CommandEngine::new(SvnClient::default(), Vec::new());
    assert!(engine.list(ListKind::Branches, &wc).unwrap().is_empty());
    assert!(engine.list(ListKind::Tags, &wc).unwrap().is_empty());

    engine
        .switch(&SwitchRequest {
            branch: Some("feature".into()),
            path: wc.clone(),
            create: true,
            message: Some("create feature branch".into()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        engine.current_branch(&wc).unwrap().to_string(),
        format!("{}/branches/feature", url)
    );
    assert_eq!(
        engine.list(ListKind::Branches, &wc).unwrap(),
        vec!["feature"]
    );

    let point = engine.branch_point(None, &wc).unwrap();
    assert_eq!(point.oldest, 2);
    assert_eq!(point.newest, 2);
}

#[test]
fn test_tag_dry_run_leaves_repository_alone() {
    require_svn!();
    let dir = TempDir::new().unwrap();
    let url = create_svn_repo(dir.path());
    let wc = checkout(&format!("{}/trunk", url), &dir.path().join("wc"));

    let mut engine = CommandEngine::new(SvnClient::default(), Vec::new());
    engine.tag("1.0", &wc, Some("release"), true).unwrap();

    let printed = String::from_utf8(engine.into_output()).unwrap();
    assert!(printed.contains(&format!("{}/tags/1.0", url)));

    let mut engine = CommandEngine::new(SvnClient::default(), Vec::new());
    assert!(engine.list(ListKind::Tags, &wc).unwrap().is_empty());
}
