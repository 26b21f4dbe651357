//! Runs a build command for each recent release of a GitHub repository
//!
//! Each tag is optionally filtered through a regular expression whose capture groups
//! become template placeholders, rendered into a release tag and a command line, and
//! built unless the release tag is already published.

use crate::boundary::BoundaryWarning;
use crate::docker::ImageTool;
use crate::domain::template::{self, Template};
use crate::error::{Result, TaggerError};
use crate::shell::CommandRunner;
use regex::Regex;
use tracing::{info, warn};

pub const DEFAULT_COMMAND_TEMPLATE: &str = "echo \"%GIT_TAG%\"";
pub const DEFAULT_RELEASE_TAG_TEMPLATE: &str = "%GIT_TAG%";
pub const DEFAULT_MAX_VERSIONS: usize = 5;

/// Settings of one `for-each-release` run
#[derive(Debug, Clone)]
pub struct ReleaseRunOptions {
    /// Stop after this many considered tags; 0 means no limit
    pub max_versions: usize,
    /// Only tags matching from their first character are considered
    pub allowed_tags: Option<Regex>,
    pub release_tag_template: String,
    pub command_template: String,
    /// Build even if `dest_docker_repo:release_tag` is already published
    pub force_rebuild: bool,
    pub dest_docker_repo: String,
    pub dry_run: bool,
}

impl ReleaseRunOptions {
    pub fn new(dest_docker_repo: impl Into<String>) -> Self {
        ReleaseRunOptions {
            max_versions: DEFAULT_MAX_VERSIONS,
            allowed_tags: None,
            release_tag_template: DEFAULT_RELEASE_TAG_TEMPLATE.to_string(),
            command_template: DEFAULT_COMMAND_TEMPLATE.to_string(),
            force_rebuild: true,
            dest_docker_repo: dest_docker_repo.into(),
            dry_run: false,
        }
    }

    /// Compile a tag filter, anchoring it at the start of the tag
    pub fn with_allowed_tags(mut self, pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{})", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| TaggerError::pattern(format!("'{}': {}", pattern, e)))?;
        self.allowed_tags = Some(regex);
        Ok(self)
    }
}

/// A tag selected for building with its rendered templates
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRelease {
    pub git_tag: String,
    pub release_tag: String,
    pub command: String,
}

/// What happened to each considered tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseReport {
    pub built: Vec<PlannedRelease>,
    /// Release tags already published and therefore not rebuilt
    pub skipped: Vec<String>,
    pub failed: Vec<PlannedRelease>,
    pub unmatched: Vec<BoundaryWarning>,
}

impl ReleaseReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Placeholder values for one git tag: %GIT_TAG% and %MATCH_N%
fn placeholders_for(git_tag: &str, groups: &[String]) -> Template {
    groups
        .iter()
        .enumerate()
        .fold(Template::new().with(template::GIT_TAG, git_tag), |acc, (i, group)| {
            acc.with(template::match_placeholder(i), group.as_str())
        })
}

/// Capture groups of the filter (group 0 excluded); unmatched groups are empty
fn capture_groups(regex: &Regex, tag: &str) -> Option<Vec<String>> {
    let captures = regex.captures(tag)?;
    Some(
        captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect(),
    )
}

/// Runs the configured command for each release tag
pub struct ReleaseRunner<'a, T: ImageTool + ?Sized, R: CommandRunner + ?Sized> {
    options: ReleaseRunOptions,
    image_tool: &'a T,
    runner: &'a R,
}

impl<'a, T: ImageTool + ?Sized, R: CommandRunner + ?Sized> ReleaseRunner<'a, T, R> {
    pub fn new(options: ReleaseRunOptions, image_tool: &'a T, runner: &'a R) -> Self {
        ReleaseRunner {
            options,
            image_tool,
            runner,
        }
    }

    /// Render the release tag and the command for a git tag
    pub fn plan(&self, git_tag: &str, groups: &[String]) -> PlannedRelease {
        let values = placeholders_for(git_tag, groups);
        let release_tag = values.render(&self.options.release_tag_template);
        let command = values
            .with(template::RELEASE_TAG, release_tag.as_str())
            .render(&self.options.command_template);

        PlannedRelease {
            git_tag: git_tag.to_string(),
            release_tag,
            command,
        }
    }

    /// Process tags in the given order (newest first, as the remote lists them)
    pub fn run(&self, tags: &[String]) -> Result<ReleaseReport> {
        let mut report = ReleaseReport::default();
        let mut selected = Vec::new();

        for tag in tags {
            let groups = match &self.options.allowed_tags {
                Some(regex) => match capture_groups(regex, tag) {
                    Some(groups) => groups,
                    None => {
                        info!("Not matched tag \"{}\"", tag);
                        report.unmatched.push(BoundaryWarning::UnmatchedReleaseTag {
                            tag: tag.clone(),
                            pattern: regex.as_str().to_string(),
                        });
                        continue;
                    }
                },
                None => Vec::new(),
            };
            selected.push((tag, groups));
        }

        let mut processed = 0;

        for (git_tag, groups) in selected {
            if self.options.max_versions > 0 && processed >= self.options.max_versions {
                break;
            }
            processed += 1;

            let planned = self.plan(git_tag, &groups);

            if !self.options.force_rebuild {
                let image = format!("{}:{}", self.options.dest_docker_repo, planned.release_tag);
                if self.image_tool.exists(&image)? {
                    info!("Skipping \"{}\" as the docker tag already exists", planned.release_tag);
                    report.skipped.push(planned.release_tag);
                    continue;
                }
            }

            info!(" ===> {}", planned.command);

            if self.options.dry_run {
                report.built.push(planned);
                continue;
            }

            match self.runner.run(&planned.command) {
                Ok(true) => report.built.push(planned),
                Ok(false) => {
                    warn!("Command for tag \"{}\" failed", planned.git_tag);
                    report.failed.push(planned);
                }
                Err(e) => {
                    warn!("Command for tag \"{}\" could not be started: {}", planned.git_tag, e);
                    report.failed.push(planned);
                }
            }
        }

        Ok(report)
    }
}
