// tests/config_test.rs
use image_tagger::config::{load_config, Config, DEFAULT_GITHUB_API_URL};
use image_tagger::TaggerError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert!(config.propagation.latest_per_version);
    assert!(config.propagation.global_latest);
    assert!(!config.propagation.keep_prefix);
    assert_eq!(config.github.api_url, DEFAULT_GITHUB_API_URL);
    assert_eq!(config.github.retries, 5);
    assert_eq!(config.docker.binary, "docker");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[propagation]
allowed_meta = ["rc", "nightly"]
global_latest = false

[github]
api_url = "http://localhost:8080"
retries = 1

[docker]
binary = "podman"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(!config.propagation.global_latest);
    assert!(config.propagation.latest_per_version);
    assert!(config.propagation.allowed_meta().contains("NIGHTLY"));
    assert!(!config.propagation.allowed_meta().contains("beta"));
    assert_eq!(config.github.api_url, "http://localhost:8080");
    assert_eq!(config.github.retries, 1);
    assert_eq!(config.github.retry_wait_secs, 5);
    assert_eq!(config.docker.binary, "podman");
}

#[test]
fn test_missing_custom_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = load_config(Some(path.to_str().unwrap()));
    assert!(matches!(result, Err(TaggerError::Config(_))));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[github]\nretries = \"many\"\n").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(matches!(result, Err(TaggerError::Config(_))));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("image-tagger.toml"),
        "[propagation]\nkeep_prefix = true\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original).unwrap();

    assert!(result.unwrap().propagation.keep_prefix);
}
