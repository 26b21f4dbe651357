use crate::domain::AllowedMeta;
use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default GitHub API endpoint used to list repository tags.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Represents the complete configuration for image-tagger.
///
/// Contains tag propagation defaults, GitHub access settings, and the docker binary to drive.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub propagation: PropagationConfig,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub docker: DockerConfig,
}

/// Returns the default list of pre-release labels allowed to propagate.
fn default_allowed_meta() -> Vec<String> {
    AllowedMeta::default().labels().map(str::to_string).collect()
}

fn default_true() -> bool {
    true
}

/// Configuration for tag propagation.
///
/// Mirrors the command-line switches of `tags`, `tag` and `push`; flags given on the
/// command line win over these values.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PropagationConfig {
    #[serde(default = "default_allowed_meta")]
    pub allowed_meta: Vec<String>,

    /// Emit per-version tags (1.2.3 -> 1.2 -> 1)
    #[serde(default = "default_true")]
    pub latest_per_version: bool,

    /// Emit the global `latest` tag
    #[serde(default = "default_true")]
    pub global_latest: bool,

    #[serde(default)]
    pub keep_prefix: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        PropagationConfig {
            allowed_meta: default_allowed_meta(),
            latest_per_version: true,
            global_latest: true,
            keep_prefix: false,
        }
    }
}

impl PropagationConfig {
    /// Allowed meta labels as a lookup set
    pub fn allowed_meta(&self) -> AllowedMeta {
        AllowedMeta::new(self.allowed_meta.iter())
    }
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_retries() -> u32 {
    5
}

fn default_retry_wait_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

/// Configuration for the GitHub tag listing collaborator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_retry_wait_secs")]
    pub retry_wait_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            retries: default_retries(),
            retry_wait_secs: default_retry_wait_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    pub fn retry_wait(&self) -> Duration {
        Duration::from_secs(self.retry_wait_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_docker_binary() -> String {
    "docker".to_string()
}

/// Configuration for the container tool invoked by `tag`, `push` and `for-each-release`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DockerConfig {
    #[serde(default = "default_docker_binary")]
    pub binary: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        DockerConfig {
            binary: default_docker_binary(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| TaggerError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `image-tagger.toml` in current directory
/// 3. `.image-tagger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| TaggerError::config(format!("Cannot read '{}': {}", path, e)))?
    } else if Path::new("./image-tagger.toml").exists() {
        fs::read_to_string("./image-tagger.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".image-tagger.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
