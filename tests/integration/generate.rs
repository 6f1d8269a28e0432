use conngen_cli::test_utils::ConnectionFixture;
use serde_json::json;

use crate::common::TestProject;

const BODY: &str = "dev-connection-types-request-body.json";

fn connections_arg(project: &TestProject) -> String {
    project.connections().display().to_string()
}

#[test]
fn test_generate_writes_camel_case_body() {
    let project = TestProject::new().unwrap();
    project
        .add_connection(
            "dev",
            "postgres.yml",
            ConnectionFixture::new("postgres")
                .attribute("display_name", "PostgreSQL")
                .parameters(&[("host", false), ("sslmode", true)]),
        )
        .unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&["generate", "dev", "abc123", "--no-git", "--connections-dir", &dir])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("Wrote 1 connection types");

    let body = project.read_json(BODY).unwrap();
    assert_eq!(body["ref"], json!("abc123"));

    let connection = &body["connectionTypes"][0];
    assert_eq!(connection["id"], json!("postgres"));
    assert_eq!(connection["displayName"], json!("PostgreSQL"));
    assert_eq!(
        connection["parameters"],
        json!([
            { "airflowParamName": "host", "isInExtra": false },
            { "airflowParamName": "sslmode", "isInExtra": true }
        ])
    );
    assert!(connection["filePath"].as_str().unwrap().ends_with("postgres.yml"));
    assert!(connection.get("lastCommitAt").is_none());
}

#[test]
fn test_generate_defaults_environment_and_sha() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&["generate", "--no-git", "--connections-dir", &dir])
        .unwrap()
        .assert_success();

    let body = project.read_json(BODY).unwrap();
    assert_eq!(body["ref"], json!("test"));
}

#[test]
fn test_generate_resolves_inheritance_and_filters_hidden() {
    let project = TestProject::new().unwrap();
    project
        .add_connection(
            "dev",
            "base/aws.yml",
            ConnectionFixture::new("aws")
                .attribute("conn_type", "aws")
                .parameters(&[("aws_access_key_id", false), ("region_name", true)])
                .hidden(),
        )
        .unwrap();
    project
        .add_connection(
            "dev",
            "s3.yml",
            ConnectionFixture::new("s3")
                .inherit_from("aws")
                .attribute("display_name", "S3")
                .attribute("visible", "true")
                .supplemental(&[("region_name", true), ("endpoint_url", true)]),
        )
        .unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&["generate", "dev", "sha1", "--no-git", "--connections-dir", &dir])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("1 hidden");

    let body = project.read_json(BODY).unwrap();
    let types = body["connectionTypes"].as_array().unwrap();
    assert_eq!(types.len(), 1);

    let s3 = &types[0];
    assert_eq!(s3["id"], json!("s3"));
    assert_eq!(s3["connType"], json!("aws"));
    assert_eq!(s3["displayName"], json!("S3"));
    assert_eq!(
        s3["parameters"],
        json!([
            { "airflowParamName": "aws_access_key_id", "isInExtra": false },
            { "airflowParamName": "region_name", "isInExtra": true },
            { "airflowParamName": "endpoint_url", "isInExtra": true }
        ])
    );
}

#[test]
fn test_generate_only_reads_requested_environment() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();
    project.add_connection("prod", "b.yml", ConnectionFixture::new("b")).unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&["generate", "prod", "sha", "--no-git", "--connections-dir", &dir])
        .unwrap()
        .assert_success();

    let body = project.read_json("prod-connection-types-request-body.json").unwrap();
    assert_eq!(body["connectionTypes"].as_array().unwrap().len(), 1);
    assert_eq!(body["connectionTypes"][0]["id"], json!("b"));
}

#[test]
fn test_generate_custom_output_path() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&[
            "generate",
            "dev",
            "sha",
            "--no-git",
            "--connections-dir",
            &dir,
            "--output",
            "out/body.json",
        ])
        .unwrap()
        .assert_success();

    let body = project.read_json("out/body.json").unwrap();
    assert_eq!(body["connectionTypes"][0]["id"], json!("a"));
}

#[test]
fn test_generate_normalizes_examples() {
    let project = TestProject::new().unwrap();
    project
        .add_document(
            "dev",
            "mysql.yml",
            "id: mysql\nparameters:\n  - airflow_param_name: port\n    example: 3306\n  - airflow_param_name: ssl\n    example: true\n  - airflow_param_name: schema\n    example: null\n  - airflow_param_name: hosts\n    example: [a, b]\n",
        )
        .unwrap();

    let dir = connections_arg(&project);
    project
        .run_conngen(&["generate", "dev", "sha", "--no-git", "--connections-dir", &dir])
        .unwrap()
        .assert_success();

    let body = project.read_json(BODY).unwrap();
    let params = &body["connectionTypes"][0]["parameters"];
    assert_eq!(params[0]["example"], json!("3306"));
    assert_eq!(params[1]["example"], json!("True"));
    assert_eq!(params[2]["example"], json!("None"));
    assert_eq!(params[3]["example"], json!("['a', 'b']"));
}

#[test]
fn test_generate_quiet_prints_nothing() {
    let project = TestProject::new().unwrap();
    project.add_connection("dev", "a.yml", ConnectionFixture::new("a")).unwrap();

    let dir = connections_arg(&project);
    let output = project
        .run_conngen(&["-q", "generate", "dev", "sha", "--no-git", "--connections-dir", &dir])
        .unwrap();
    output.assert_success();
    assert!(output.stdout.is_empty(), "stdout: {}", output.stdout);
}
