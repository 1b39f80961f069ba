mod setup;

use std::io::Write;

use predicates::prelude::*;

use crate::setup::{DEFAULT_TIMEOUT, make_cli};

#[test]
fn missing_credentials_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("credentials.json");

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg("--credentials")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR: Unable to read credentials file"));
}

#[test]
fn default_credentials_path_is_relative() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unable to read credentials file"))
        .stderr(predicate::str::contains("credentials.json"));
}

#[test]
fn malformed_credentials_file() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{{\"project_id\": \"only\"").expect("failed to write temp file");

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg("--credentials")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR: Unable to parse credentials file"));
}

#[test]
fn credentials_without_private_key() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    write!(
        file,
        r#"{{"client_email": "writer@example.com", "private_key": "not a pem"}}"#
    )
    .expect("failed to write temp file");

    make_cli()
        .timeout(DEFAULT_TIMEOUT)
        .arg("--credentials")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing private key in credentials"));
}
