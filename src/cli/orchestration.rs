//! Workflow orchestration behind each subcommand
//!
//! Keeps CLI argument parsing (clap, in main.rs) apart from the workflows so
//! they can be called programmatically and tested with mock collaborators.

use crate::ci::{ProcessRequest, RenderedRequest, SpecificRelease};
use crate::config::{GitHubConfig, PropagationConfig};
use crate::docker::{self, ImageTool};
use crate::domain::{increment_version, AllowedMeta, ImageReference};
use crate::error::{Result, TaggerError};
use crate::git::Repository;
use crate::github::{GitHubTagLister, RetryPolicy, RetryingTagLister, TagLister};
use crate::propagation::{Propagation, PropagationOptions, VersionTagPropagator};
use crate::releases::{ReleaseReport, ReleaseRunOptions, ReleaseRunner};
use crate::resolver::ClosestVersionResolver;
use crate::shell::CommandRunner;
use std::time::Duration;
use tracing::info;

/// Image selection and propagation switches shared by `tags`, `tag` and `push`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageArgs {
    /// Full reference, e.g. "quay.io/riotkit/infracheck:v2.0.0"
    pub image: String,

    /// Compute propagated tags; otherwise only the image itself is used
    pub propagate: bool,

    pub without_latest: bool,

    pub without_global_latest: bool,

    /// Comma separated override of the allowed meta labels
    pub allowed_meta: Option<String>,

    pub keep_prefix: bool,
}

/// Merge command-line switches over configured defaults
pub fn propagation_options(args: &ImageArgs, config: &PropagationConfig) -> PropagationOptions {
    PropagationOptions {
        propagate_minor_major: config.latest_per_version && !args.without_latest,
        add_global_latest: config.global_latest && !args.without_global_latest,
        allowed_meta: args
            .allowed_meta
            .as_deref()
            .map(AllowedMeta::parse)
            .unwrap_or_else(|| config.allowed_meta()),
        keep_prefix: args.keep_prefix || config.keep_prefix,
    }
}

/// Compute the images a `tags`/`tag`/`push` invocation acts on
pub fn compute_images(args: &ImageArgs, config: &PropagationConfig) -> Result<Propagation> {
    if !args.propagate {
        ImageReference::parse(&args.image)?;
        return Ok(Propagation {
            tags: vec![args.image.clone()],
            warning: None,
        });
    }

    VersionTagPropagator::new(propagation_options(args, config)).propagate(&args.image)
}

/// What `tag` or `push` does with each image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Tag,
    Push,
}

impl PublishAction {
    pub fn verb(&self) -> &'static str {
        match self {
            PublishAction::Tag => "tag",
            PublishAction::Push => "push",
        }
    }
}

/// Result of a `tag` or `push` workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub propagation: Propagation,

    pub action: PublishAction,

    /// False for dry runs
    pub executed: bool,
}

/// Tag or push the original image under all computed references
pub fn run_publish<T: ImageTool + ?Sized>(
    action: PublishAction,
    args: &ImageArgs,
    config: &PropagationConfig,
    tool: &T,
    dry_run: bool,
) -> Result<WorkflowResult> {
    let propagation = compute_images(args, config)?;

    if !dry_run {
        match action {
            PublishAction::Tag => docker::tag_images(tool, &args.image, &propagation.tags)?,
            PublishAction::Push => docker::push_images(tool, &propagation.tags)?,
        }
    }

    Ok(WorkflowResult {
        propagation,
        action,
        executed: !dry_run,
    })
}

/// Build the production tag lister: GitHub API wrapped in bounded retries.
///
/// `retries` and `retry_wait_secs` override the configured values when given.
pub fn github_lister(
    config: &GitHubConfig,
    retries: Option<u32>,
    retry_wait_secs: Option<u64>,
    token: Option<String>,
) -> Result<RetryingTagLister<GitHubTagLister>> {
    let policy = RetryPolicy::new(
        retries.unwrap_or(config.retries),
        retry_wait_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.retry_wait()),
    );
    let client = GitHubTagLister::new(&config.api_url, config.timeout())?.with_token(token);

    Ok(RetryingTagLister::new(client, policy))
}

/// Resolve the published release closest to `compare_with`
pub fn run_find_closest<L: TagLister>(
    lister: L,
    repository: &str,
    compare_with: &str,
) -> Result<String> {
    ClosestVersionResolver::new(lister).resolve(repository, compare_with)
}

/// Arguments of the `for-each-release` workflow
#[derive(Debug, Clone)]
pub struct ForEachReleaseArgs {
    pub repository: String,
    pub options: ReleaseRunOptions,
}

/// List the repository's tags and run the build command for each selected release
pub fn run_for_each_release<L, T, R>(
    lister: L,
    tool: &T,
    runner: &R,
    args: ForEachReleaseArgs,
) -> Result<ReleaseReport>
where
    L: TagLister,
    T: ImageTool + ?Sized,
    R: CommandRunner + ?Sized,
{
    let tags = lister.list_tags(&args.repository)?;
    info!(repository = %args.repository, count = tags.len(), "listed release tags");

    ReleaseRunner::new(args.options, tool, runner).run(&tags)
}

/// Whether the registry already has the image
pub fn run_tag_exists<T: ImageTool + ?Sized>(tool: &T, image: &str) -> Result<bool> {
    ImageReference::parse(image)?;
    tool.exists(image)
}

/// Arguments of the `specific-release` workflow
#[derive(Debug, Clone)]
pub struct SpecificReleaseArgs {
    pub release: SpecificRelease,

    /// Push the propagated tags after tagging
    pub push: bool,

    /// Only render the build command and compute the tags
    pub dry_run: bool,
}

/// Result of a `specific-release` workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificReleaseResult {
    pub build_command: String,
    pub propagation: Propagation,
    pub pushed: bool,
    pub executed: bool,
}

/// Build one release image, then tag it (and push it) with propagation.
///
/// `%FIND_CLOSEST_RELEASE(owner/repo)%` in the build options is replaced by the
/// release of `owner/repo` closest to the application version.
pub fn run_specific_release<L, T, R>(
    lister: L,
    tool: &T,
    runner: &R,
    docker_binary: &str,
    config: &PropagationConfig,
    args: SpecificReleaseArgs,
) -> Result<SpecificReleaseResult>
where
    L: TagLister,
    T: ImageTool + ?Sized,
    R: CommandRunner + ?Sized,
{
    let release = &args.release;
    let image = release.image();
    ImageReference::parse(&image)?;

    let opts = match &release.build_opts {
        Some(opts) => ClosestVersionResolver::new(lister)
            .expand_placeholders(opts, release.app_version.as_deref())?,
        None => String::new(),
    };
    let build_command = release.build_command(docker_binary, &opts);

    let image_args = ImageArgs {
        image: image.clone(),
        propagate: true,
        ..ImageArgs::default()
    };

    if args.dry_run {
        return Ok(SpecificReleaseResult {
            build_command,
            propagation: compute_images(&image_args, config)?,
            pushed: false,
            executed: false,
        });
    }

    info!(" ===> {}", build_command);
    if !runner.run(&build_command)? {
        return Err(TaggerError::command(format!("Cannot build docker image {}", image)));
    }

    let tagged = run_publish(PublishAction::Tag, &image_args, config, tool, false)?;
    if args.push {
        docker::push_images(tool, &tagged.propagation.tags)?;
    }

    Ok(SpecificReleaseResult {
        build_command,
        propagation: tagged.propagation,
        pushed: args.push,
        executed: true,
    })
}

/// Outcome of a `process` workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub rendered: RenderedRequest,
    pub rebuild: bool,
    pub executed: bool,
    pub success: bool,
}

/// Version a CI build request from the repository state and run its command
pub fn run_process<G, R>(
    repo: &G,
    runner: &R,
    request: &ProcessRequest,
    dry_run: bool,
) -> Result<ProcessOutcome>
where
    G: Repository + ?Sized,
    R: CommandRunner + ?Sized,
{
    let current = repo.current_tag()?;
    let latest = repo.latest_tag()?;
    let next_version = increment_version(latest.as_deref().unwrap_or(""));

    let decision = request.decide(current.as_deref(), latest.as_deref());
    let rendered = request.render(&decision, &next_version);

    let success = if dry_run {
        true
    } else {
        info!(" ===> {}", rendered.command);
        runner.run(&rendered.command)?
    };

    Ok(ProcessOutcome {
        rendered,
        rebuild: decision.rebuild,
        executed: !dry_run,
        success,
    })
}

/// Next patch version after the most recent tag of the repository
pub fn run_next_version<R: Repository + ?Sized>(repo: &R) -> Result<String> {
    let latest = repo.latest_tag()?;
    Ok(increment_version(latest.as_deref().unwrap_or("")))
}

/// Tag pointing exactly at HEAD
pub fn run_current_tag<R: Repository + ?Sized>(repo: &R) -> Result<Option<String>> {
    repo.current_tag()
}
