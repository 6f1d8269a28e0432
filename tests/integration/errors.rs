use assert_cmd::Command;
use conngen_cli::test_utils::ConnectionFixture;
use predicates::prelude::*;

use crate::common::TestProject;

fn generate(project: &TestProject) -> crate::common::CommandOutput {
    let dir = project.connections().display().to_string();
    project
        .run_conngen(&["generate", "dev", "sha", "--no-git", "--connections-dir", &dir])
        .unwrap()
}

#[test]
fn test_missing_ancestor_fails() {
    let project = TestProject::new().unwrap();
    project
        .add_connection("dev", "child.yml", ConnectionFixture::new("child").inherit_from("ghost"))
        .unwrap();

    generate(&project)
        .assert_failure()
        .assert_stderr_contains("Connection 'child' inherits from 'ghost', which does not exist");

    assert!(project.read_file("dev-connection-types-request-body.json").is_err());
}

#[test]
fn test_cycle_fails_with_chain() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a").inherit_from("b")).unwrap();
    project.add_connection("dev", "b.yml", ConnectionFixture::new("b").inherit_from("a")).unwrap();

    generate(&project)
        .assert_failure()
        .assert_stderr_contains("Circular inheritance detected: a -> b -> a");
}

#[test]
fn test_self_inheritance_fails() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "loop.yml", ConnectionFixture::new("loop").inherit_from("loop")).unwrap();

    generate(&project).assert_failure().assert_stderr_contains("loop -> loop");
}

#[test]
fn test_malformed_supplemental_parameter_fails() {
    let project = TestProject::new().unwrap();
    project
        .add_connection("dev", "base.yml", ConnectionFixture::new("base").parameters(&[("host", false)]))
        .unwrap();
    project
        .add_document("dev", "child.yml", "id: child\ninherit_from: base\n+parameters:\n  - example: oops\n")
        .unwrap();

    generate(&project)
        .assert_failure()
        .assert_stderr_contains("Malformed parameter in connection 'child'");
}

#[test]
fn test_duplicate_id_fails() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "one.yml", ConnectionFixture::new("same")).unwrap();
    project.add_connection("dev", "two.yml", ConnectionFixture::new("same")).unwrap();

    generate(&project).assert_failure().assert_stderr_contains("Duplicate connection id 'same'");
}

#[test]
fn test_invalid_yaml_fails() {
    let project = TestProject::new().unwrap();
    project.add_document("dev", "bad.yml", "id: [unclosed\n").unwrap();

    generate(&project)
        .assert_failure()
        .assert_stderr_contains("Failed to parse connection document");
}

#[test]
fn test_missing_environment_directory_fails() {
    let project = TestProject::new().unwrap();

    generate(&project)
        .assert_failure()
        .assert_stderr_contains("Connections directory not found");
}

#[test]
fn test_document_without_id_fails() {
    let project = TestProject::new().unwrap();
    project.add_document("dev", "nameless.yml", "display_name: Nameless\n").unwrap();

    generate(&project).assert_failure().assert_stderr_contains("missing `id`");
}

#[test]
fn test_error_includes_suggestion() {
    let project = TestProject::new().unwrap();
    project
        .add_connection("dev", "child.yml", ConnectionFixture::new("child").inherit_from("ghost"))
        .unwrap();
    let dir = project.connections().display().to_string();

    Command::cargo_bin("conngen")
        .unwrap()
        .args(["generate", "dev", "sha", "--no-git", "--connections-dir", &dir])
        .current_dir(project.root())
        .env("NO_COLOR", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("suggestion:")));
}
