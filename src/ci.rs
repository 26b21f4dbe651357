//! CI entry points: deciding how an incoming build request is versioned, and
//! describing a single release build.
//!
//! Decisions are pure; the workflows in `cli::orchestration` feed them with the
//! repository state and run the rendered commands.

use crate::domain::template::{self, Template};
use tracing::info;

/// Commit message marker that forces rebuilding images which already exist
pub const FORCE_REBUILD_MARKER: &str = "@force-rebuild";

/// Commit message marker that rebuilds the most recent tag as a release
pub const FORCE_REBUILD_LAST_TAG_MARKER: &str = "@force-rebuild-last-tag";

pub const DEFAULT_TASK_TYPE: &str = "for-each-release";
pub const DEFAULT_PROCESS_COMMAND: &str = "echo \"%VERSION%\"";
pub const DEFAULT_DEV_VERSION_TEMPLATE: &str = "%MATCH_0%-SNAPSHOT";
pub const DEFAULT_RELEASE_VERSION_TEMPLATE: &str = "%MATCH_0%-D%GIT_TAG%";

/// Rendered into `%REBUILD_FLAG%` when existing images must be kept
pub const DONT_REBUILD_FLAG: &str = " --dont-rebuild";

/// A build request coming from CI
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub commit_message: String,

    /// Command to run; supports %VERSION%, %VERSION_TEMPLATE%, %NEXT_VERSION%,
    /// %REBUILD_FLAG%, %RELEASE_TASK% and %GIT_TAG%
    pub command_template: String,

    /// Rendered into %RELEASE_TASK%
    pub task_type: String,

    pub dev_version_template: String,
    pub release_version_template: String,
}

impl ProcessRequest {
    pub fn new(commit_message: impl Into<String>) -> Self {
        ProcessRequest {
            commit_message: commit_message.into(),
            command_template: DEFAULT_PROCESS_COMMAND.to_string(),
            task_type: DEFAULT_TASK_TYPE.to_string(),
            dev_version_template: DEFAULT_DEV_VERSION_TEMPLATE.to_string(),
            release_version_template: DEFAULT_RELEASE_VERSION_TEMPLATE.to_string(),
        }
    }

    /// Decide between a development and a release build.
    ///
    /// Being on a tag builds a release and rebuilds existing images. The commit
    /// message markers can force a rebuild, or a release build of `latest_tag`.
    pub fn decide(&self, current_tag: Option<&str>, latest_tag: Option<&str>) -> BuildDecision {
        let mut decision = BuildDecision {
            rebuild: false,
            release: false,
            git_tag: current_tag.unwrap_or_default().to_string(),
        };

        if current_tag.is_some() {
            info!("Rebuilding as currently on a tag");
            decision.rebuild = true;
            decision.release = true;
        }

        if self.commit_message.contains(FORCE_REBUILD_MARKER) {
            info!("Rebuilding as {} specified", FORCE_REBUILD_MARKER);
            decision.rebuild = true;
        }

        if self.commit_message.contains(FORCE_REBUILD_LAST_TAG_MARKER) {
            info!("Rebuilding last tag as {} specified", FORCE_REBUILD_LAST_TAG_MARKER);
            decision.git_tag = latest_tag.unwrap_or_default().to_string();
            decision.release = true;
        }

        decision
    }

    /// Render the version template and the command for a decision
    pub fn render(&self, decision: &BuildDecision, next_version: &str) -> RenderedRequest {
        let values = Template::new()
            .with(template::NEXT_VERSION, next_version)
            .with(
                template::REBUILD_FLAG,
                if decision.rebuild { "" } else { DONT_REBUILD_FLAG },
            )
            .with(template::RELEASE_TASK, self.task_type.as_str())
            .with(template::GIT_TAG, decision.git_tag.as_str());

        let version_template = if decision.release {
            &self.release_version_template
        } else {
            &self.dev_version_template
        };
        let version = values.render(version_template);
        info!("Produced version template: {}", version);

        let command = values
            .with(template::VERSION, version.as_str())
            .with(template::VERSION_TEMPLATE, version.as_str())
            .render(&self.command_template);

        RenderedRequest { version, command }
    }
}

/// How a request is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDecision {
    /// Rebuild images that already exist in the registry
    pub rebuild: bool,

    /// Use the release version template instead of the development one
    pub release: bool,

    /// Tag being built; empty for development builds
    pub git_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub version: String,
    pub command: String,
}

/// One docker build of a release, tagged and optionally pushed afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificRelease {
    /// e.g. "quay.io/riotkit/tunman"
    pub dest_docker_repo: String,

    /// Image tag
    pub docker_version: String,

    /// Target version for %FIND_CLOSEST_RELEASE(owner/repo)% in the build options
    pub app_version: Option<String>,

    pub dockerfile: String,

    /// Build context
    pub dir: String,

    /// Extra `docker build` options
    pub build_opts: Option<String>,
}

impl SpecificRelease {
    pub fn new(dest_docker_repo: impl Into<String>, docker_version: impl Into<String>) -> Self {
        SpecificRelease {
            dest_docker_repo: dest_docker_repo.into(),
            docker_version: docker_version.into(),
            app_version: None,
            dockerfile: "./Dockerfile".to_string(),
            dir: ".".to_string(),
            build_opts: None,
        }
    }

    /// Full image reference being built
    pub fn image(&self) -> String {
        format!("{}:{}", self.dest_docker_repo, self.docker_version)
    }

    /// Shell command building the image with already expanded `opts`
    pub fn build_command(&self, docker_binary: &str, opts: &str) -> String {
        let image = self.image();
        let app_version = format!(
            "RKT_APP_VERSION=\"{}\"",
            self.app_version.as_deref().unwrap_or_default()
        );
        let image_version = format!("RKT_IMG_VERSION={}", self.docker_version);

        let mut parts = vec![
            docker_binary,
            "build",
            self.dir.as_str(),
            "-f",
            self.dockerfile.as_str(),
            "-t",
            image.as_str(),
        ];
        if !opts.trim().is_empty() {
            parts.push(opts.trim());
        }
        parts.extend(["--build-arg", app_version.as_str()]);
        parts.extend(["--build-arg", image_version.as_str()]);

        parts.join(" ")
    }
}
