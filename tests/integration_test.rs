// tests/integration_test.rs
use std::process::Command;

fn image_tagger() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_image-tagger"));
    command.env("RUST_LOG", "off");
    command
}

#[test]
fn test_image_tagger_help() {
    let output = image_tagger()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("image-tagger"));
    assert!(stdout.contains("find-closest-release"));
    assert!(stdout.contains("for-each-release"));
    assert!(stdout.contains("specific-release"));
    assert!(stdout.contains("tag-exists"));
    assert!(stdout.contains("process"));
}

#[test]
fn test_image_tagger_version() {
    let output = image_tagger()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_tags_prints_propagated_images() {
    let output = image_tagger()
        .args(["tags", "--propagate", "--without-global-latest", "-i", "repo:v2.3.4"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["repo:2.3.4", "repo:2", "repo:2.3"]);
}

#[test]
fn test_tags_keep_prefix_and_allowed_meta() {
    let output = image_tagger()
        .args([
            "tags",
            "--propagate",
            "--without-latest",
            "--without-global-latest",
            "--keep-prefix",
            "--allowed-meta",
            "rc",
            "-i",
            "quay.io/riotkit/infracheck:v2.0.0-rc1",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "quay.io/riotkit/infracheck:v2.0.0-rc1",
            "quay.io/riotkit/infracheck:v2.0.0-latest-rc",
        ]
    );
}

#[test]
fn test_tags_rejects_reference_without_tag() {
    let output = image_tagger()
        .args(["tags", "-i", "quay.io/riotkit/infracheck"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("quay.io/riotkit/infracheck"));
}

#[test]
fn test_next_version_with_explicit_tag() {
    let output = image_tagger()
        .args(["next-version", "--tag", "v1.2.3"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "1.2.4");
}

#[test]
fn test_tag_exists_rejects_reference_without_tag() {
    let output = image_tagger()
        .args(["tag-exists", "-i", "quay.io/riotkit/infracheck"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("quay.io/riotkit/infracheck"));
}

#[test]
fn test_specific_release_requires_docker_version() {
    let output = image_tagger()
        .args(["specific-release", "-i", "quay.io/riotkit/taiga"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--docker-version"));
}

#[test]
fn test_specific_release_dry_run_prints_build_command() {
    let output = image_tagger()
        .args([
            "specific-release",
            "-i",
            "quay.io/riotkit/tunman",
            "--docker-version",
            "1.0.2",
            "-o",
            "--no-cache",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("build . -f ./Dockerfile -t quay.io/riotkit/tunman:1.0.2 --no-cache"));
    assert!(stderr.contains("quay.io/riotkit/tunman:1.0"));
}
