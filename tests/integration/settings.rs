use conngen_cli::test_utils::ConnectionFixture;
use serde_json::json;

use crate::common::TestProject;

#[test]
fn test_config_file_in_working_directory() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();
    project
        .write_file(
            "conngen.toml",
            "connections_dir = \"connections\"\noutput = \"build/{environment}.json\"\ngit_timestamps = false\n",
        )
        .unwrap();

    project.run_conngen(&["generate", "dev", "sha"]).unwrap().assert_success();

    let body = project.read_json("build/dev.json").unwrap();
    assert_eq!(body["connectionTypes"][0]["id"], json!("a"));
}

#[test]
fn test_config_pattern_limits_documents() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();
    project.add_connection("dev", "b.yaml", ConnectionFixture::new("b")).unwrap();
    project
        .write_file("settings.toml", "pattern = \"*.yaml\"\ngit_timestamps = false\n")
        .unwrap();

    project.run_conngen(&["--config", "settings.toml", "generate", "dev", "sha"]).unwrap().assert_success();

    let body = project.read_json("dev-connection-types-request-body.json").unwrap();
    let types = body["connectionTypes"].as_array().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["id"], json!("b"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let project = TestProject::new().unwrap();

    project
        .run_conngen(&["--config", "nope.toml", "generate"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("nope.toml");
}

#[test]
fn test_unknown_config_key_fails() {
    let project = TestProject::new().unwrap();
    project.write_file("conngen.toml", "connection_dir = \"typo\"\n").unwrap();

    project.run_conngen(&["generate"]).unwrap().assert_failure();
}
