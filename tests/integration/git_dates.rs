use conngen_cli::test_utils::ConnectionFixture;
use std::process::Command;

use crate::common::TestProject;

fn git(project: &TestProject, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(project.root())
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[test]
fn test_generate_records_last_commit_date() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();

    if !git(&project, &["init", "-q"]) {
        eprintln!("git not available, skipping");
        return;
    }
    assert!(git(&project, &["add", "."]));
    assert!(git(&project, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", "add a"]));

    project
        .run_conngen(&["generate", "dev", "sha", "--connections-dir", "connections"])
        .unwrap()
        .assert_success();

    let body = project.read_json("dev-connection-types-request-body.json").unwrap();
    let date = body["connectionTypes"][0]["lastCommitAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok(), "not RFC 3339: {date}");
}

#[test]
fn test_last_commit_date_from_outside_repository() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "nested/b.yml", ConnectionFixture::new("b")).unwrap();

    if !git(&project, &["init", "-q"]) {
        eprintln!("git not available, skipping");
        return;
    }
    assert!(git(&project, &["add", "."]));
    assert!(git(&project, &["-c", "commit.gpgsign=false", "commit", "-q", "-m", "add b"]));

    let elsewhere = tempfile::tempdir().unwrap();
    let connections = project.connections().display().to_string();
    let output = elsewhere.path().join("body.json");

    assert_cmd::Command::cargo_bin("conngen")
        .unwrap()
        .args(["generate", "dev", "sha", "--connections-dir", &connections, "--output"])
        .arg(&output)
        .current_dir(elsewhere.path())
        .env("NO_COLOR", "1")
        .assert()
        .success();

    let body: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let date = body["connectionTypes"][0]["lastCommitAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok(), "not RFC 3339: {date}");
}
