use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_tagger::ci::{self, ProcessRequest, SpecificRelease};
use image_tagger::cli::orchestration::{
    self, ForEachReleaseArgs, ImageArgs, PublishAction, SpecificReleaseArgs, WorkflowResult,
};
use image_tagger::config::{self, Config};
use image_tagger::docker::DockerCli;
use image_tagger::git::Git2Repository;
use image_tagger::releases::{ReleaseRunOptions, DEFAULT_MAX_VERSIONS};
use image_tagger::shell::ShellRunner;
use image_tagger::ui;

const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Parser)]
#[command(
    name = "image-tagger",
    version,
    about = "Propagate docker image tags and build images for GitHub releases"
)]
struct Cli {
    #[arg(long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log debug details to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tags an image would be published under
    Tags(ImageCliArgs),

    /// Tag the local image under all computed tags
    Tag(PublishCliArgs),

    /// Push all computed tags to the registry
    Push(PublishCliArgs),

    /// Print the published release closest to a version
    FindClosestRelease(FindClosestCliArgs),

    /// Run a build command for each recent release of a GitHub repository
    ForEachRelease(ForEachReleaseCliArgs),

    /// Check whether an image tag is already published
    TagExists {
        #[arg(short, long, help = "Image name with tag")]
        image: String,
    },

    /// Build one release image, then tag and push it with propagation
    SpecificRelease(SpecificReleaseCliArgs),

    /// Decide the version of a CI build request and run the build command
    Process(ProcessCliArgs),

    /// Print the version following the newest tag of the current repository
    NextVersion {
        #[arg(long, help = "Increment this tag instead of reading the repository")]
        tag: Option<String>,
    },

    /// Print the tag pointing at HEAD, if any
    CurrentTag,
}

#[derive(Args)]
struct ImageCliArgs {
    #[arg(short, long, help = "Image name with tag, e.g. quay.io/riotkit/infracheck:v2.0.0")]
    image: String,

    #[arg(short, long, help = "Propagate tags, e.g. 1.0.0 -> 1.0 -> 1 -> latest")]
    propagate: bool,

    #[arg(long, visible_alias = "wl", help = "Do not tag latest per version")]
    without_latest: bool,

    #[arg(long, visible_alias = "wgl", help = "Do not tag :latest")]
    without_global_latest: bool,

    #[arg(short = 'm', long, help = "Allowed meta labels, comma separated, e.g. rc,alpha,beta")]
    allowed_meta: Option<String>,

    #[arg(short, long, help = "Keep a prefix like \"release-\" or \"v\" if present in the tag")]
    keep_prefix: bool,
}

impl From<ImageCliArgs> for ImageArgs {
    fn from(args: ImageCliArgs) -> Self {
        ImageArgs {
            image: args.image,
            propagate: args.propagate,
            without_latest: args.without_latest,
            without_global_latest: args.without_global_latest,
            allowed_meta: args.allowed_meta,
            keep_prefix: args.keep_prefix,
        }
    }
}

#[derive(Args)]
struct PublishCliArgs {
    #[command(flatten)]
    image: ImageCliArgs,

    #[arg(long, help = "Only print what would be done")]
    dry_run: bool,
}

#[derive(Args)]
struct RepositoryCliArgs {
    #[arg(short = 'n', long, help = "Repository name, e.g. riotkit-org/filerepository")]
    repository: String,

    #[arg(short, long, help = "Maximum number of retries of a request to GitHub")]
    retries: Option<u32>,

    #[arg(short = 'w', long, help = "Seconds between retries")]
    retry_wait: Option<u64>,
}

#[derive(Args)]
struct FindClosestCliArgs {
    #[command(flatten)]
    repository: RepositoryCliArgs,

    #[arg(short, long, help = "Version to compare with")]
    compare_with: String,
}

#[derive(Args)]
struct ForEachReleaseCliArgs {
    #[command(flatten)]
    repository: RepositoryCliArgs,

    #[arg(long, help = "Docker repository checked for already built releases")]
    dest_docker_repo: String,

    #[arg(
        short,
        long = "exec",
        default_value = image_tagger::releases::DEFAULT_COMMAND_TEMPLATE,
        help = "Command to run; supports %GIT_TAG%, %RELEASE_TAG% and %MATCH_N%"
    )]
    exec: String,

    #[arg(long, help = "Skip releases already present in the docker repository")]
    dont_rebuild: bool,

    #[arg(long, help = "Only consider tags matching this regular expression")]
    allowed_tags_regexp: Option<String>,

    #[arg(
        short = 't',
        long,
        default_value = image_tagger::releases::DEFAULT_RELEASE_TAG_TEMPLATE,
        help = "Docker tag template; supports %GIT_TAG% and %MATCH_N%"
    )]
    release_tag_template: String,

    #[arg(long, default_value_t = DEFAULT_MAX_VERSIONS, help = "Number of recent releases to consider, 0 for all")]
    max_versions: usize,

    #[arg(long, help = "Only print the commands that would run")]
    dry_run: bool,
}

#[derive(Args)]
struct SpecificReleaseCliArgs {
    #[arg(short = 'i', long, help = "Docker repository, e.g. quay.io/riotkit/tunman")]
    dest_docker_repo: String,

    #[arg(long, help = "Version of the docker image (image tag)")]
    docker_version: String,

    #[arg(long, help = "Application version, target of %FIND_CLOSEST_RELEASE(owner/repo)%")]
    app_version: Option<String>,

    #[arg(short = 'f', long, default_value = "./Dockerfile", help = "Path to Dockerfile")]
    dockerfile: String,

    #[arg(short = 'd', long, default_value = ".", help = "Build directory")]
    dir: String,

    #[arg(
        short = 'o',
        long,
        allow_hyphen_values = true,
        help = "docker build options; supports %FIND_CLOSEST_RELEASE(owner/repo)%"
    )]
    docker_build_opts: Option<String>,

    #[arg(long, help = "Do not push to the docker registry")]
    no_push: bool,

    #[arg(short, long, help = "Maximum number of retries of a request to GitHub")]
    retries: Option<u32>,

    #[arg(short = 'w', long, help = "Seconds between retries")]
    retry_wait: Option<u64>,

    #[arg(long, help = "Only print the build command and tags")]
    dry_run: bool,
}

#[derive(Args)]
struct ProcessCliArgs {
    #[arg(long, help = "Commit message, may contain @force-rebuild or @force-rebuild-last-tag")]
    commit_message: String,

    #[arg(
        short = 't',
        long = "type",
        default_value = ci::DEFAULT_TASK_TYPE,
        help = "Task type, rendered into %RELEASE_TASK%"
    )]
    task_type: String,

    #[arg(
        short,
        long = "exec",
        default_value = ci::DEFAULT_PROCESS_COMMAND,
        help = "Command to run; supports %VERSION%, %NEXT_VERSION%, %REBUILD_FLAG%, %RELEASE_TASK%, %GIT_TAG%"
    )]
    exec: String,

    #[arg(long, default_value = ci::DEFAULT_DEV_VERSION_TEMPLATE)]
    dev_version_template: String,

    #[arg(long, default_value = ci::DEFAULT_RELEASE_VERSION_TEMPLATE)]
    release_version_template: String,

    #[arg(long, help = "Only print the rendered command")]
    dry_run: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "image_tagger=debug"
    } else {
        "image_tagger=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Tags(args) => {
            let propagation = orchestration::compute_images(&args.into(), &config.propagation)?;
            if let Some(warning) = &propagation.warning {
                ui::display_boundary_warning(warning);
            }
            ui::print_lines(&propagation.tags);
        }
        Command::Tag(args) => publish(PublishAction::Tag, args, config)?,
        Command::Push(args) => publish(PublishAction::Push, args, config)?,
        Command::FindClosestRelease(args) => {
            let lister = orchestration::github_lister(
                &config.github,
                args.repository.retries,
                args.repository.retry_wait,
                github_token(),
            )?;
            let closest = orchestration::run_find_closest(
                lister,
                &args.repository.repository,
                &args.compare_with,
            )?;
            println!("{}", closest);
        }
        Command::ForEachRelease(args) => for_each_release(args, config)?,
        Command::TagExists { image } => {
            let tool = DockerCli::new(&config.docker.binary);
            if orchestration::run_tag_exists(&tool, &image)? {
                println!("Image found.");
            } else {
                println!("Image not found");
                std::process::exit(1);
            }
        }
        Command::SpecificRelease(args) => specific_release(args, config)?,
        Command::Process(args) => process(args)?,
        Command::NextVersion { tag } => {
            let next = match tag {
                Some(tag) => image_tagger::domain::increment_version(&tag),
                None => orchestration::run_next_version(&Git2Repository::open(".")?)?,
            };
            println!("{}", next);
        }
        Command::CurrentTag => {
            if let Some(tag) = orchestration::run_current_tag(&Git2Repository::open(".")?)? {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

fn publish(action: PublishAction, args: PublishCliArgs, config: &Config) -> Result<()> {
    let tool = DockerCli::new(&config.docker.binary);
    let dry_run = args.dry_run;
    let image_args: ImageArgs = args.image.into();

    let WorkflowResult {
        propagation,
        executed,
        ..
    } = orchestration::run_publish(action, &image_args, &config.propagation, &tool, dry_run)?;

    if let Some(warning) = &propagation.warning {
        ui::display_boundary_warning(warning);
    }
    ui::display_images(&propagation.tags, action.verb());

    if executed {
        ui::display_success(&format!(
            "Finished: {} image(s) {}",
            propagation.tags.len(),
            match action {
                PublishAction::Tag => "tagged",
                PublishAction::Push => "pushed",
            }
        ));
    } else {
        ui::display_status("Dry run, nothing was changed");
    }

    Ok(())
}

fn for_each_release(args: ForEachReleaseCliArgs, config: &Config) -> Result<()> {
    let mut options = ReleaseRunOptions::new(args.dest_docker_repo);
    options.max_versions = args.max_versions;
    options.release_tag_template = args.release_tag_template;
    options.command_template = args.exec;
    options.force_rebuild = !args.dont_rebuild;
    options.dry_run = args.dry_run;
    if let Some(pattern) = &args.allowed_tags_regexp {
        options = options.with_allowed_tags(pattern)?;
    }

    let lister = orchestration::github_lister(
        &config.github,
        args.repository.retries,
        args.repository.retry_wait,
        github_token(),
    )?;
    let tool = DockerCli::new(&config.docker.binary);
    let runner = ShellRunner::default();

    let report = orchestration::run_for_each_release(
        lister,
        &tool,
        &runner,
        ForEachReleaseArgs {
            repository: args.repository.repository,
            options,
        },
    )?;

    ui::display_release_report(&report, args.dry_run);

    if !report.is_success() {
        anyhow::bail!("{} release build(s) failed", report.failed.len());
    }

    Ok(())
}

fn specific_release(args: SpecificReleaseCliArgs, config: &Config) -> Result<()> {
    let mut release = SpecificRelease::new(args.dest_docker_repo, args.docker_version);
    release.app_version = args.app_version;
    release.dockerfile = args.dockerfile;
    release.dir = args.dir;
    release.build_opts = args.docker_build_opts;

    let lister = orchestration::github_lister(
        &config.github,
        args.retries,
        args.retry_wait,
        github_token(),
    )?;
    let tool = DockerCli::new(&config.docker.binary);
    let runner = ShellRunner::default();

    let result = orchestration::run_specific_release(
        lister,
        &tool,
        &runner,
        &config.docker.binary,
        &config.propagation,
        SpecificReleaseArgs {
            release,
            push: !args.no_push,
            dry_run: args.dry_run,
        },
    )?;

    if let Some(warning) = &result.propagation.warning {
        ui::display_boundary_warning(warning);
    }

    if result.executed {
        ui::display_success(&format!("Built: {}", result.build_command));
        ui::display_images(&result.propagation.tags, "tag");
        if result.pushed {
            ui::display_images(&result.propagation.tags, "push");
        }
    } else {
        ui::display_status(&format!("Would run: {}", result.build_command));
        ui::display_images(&result.propagation.tags, "tag");
    }

    Ok(())
}

fn process(args: ProcessCliArgs) -> Result<()> {
    let request = ProcessRequest {
        commit_message: args.commit_message,
        command_template: args.exec,
        task_type: args.task_type,
        dev_version_template: args.dev_version_template,
        release_version_template: args.release_version_template,
    };
    let repo = Git2Repository::open(".")?;
    let runner = ShellRunner::default();

    let outcome = orchestration::run_process(&repo, &runner, &request, args.dry_run)?;

    ui::display_status(&format!("Version template: {}", outcome.rendered.version));
    if !outcome.executed {
        ui::display_status(&format!("Would run: {}", outcome.rendered.command));
    } else if !outcome.success {
        anyhow::bail!("Command failed: {}", outcome.rendered.command);
    }

    Ok(())
}

fn github_token() -> Option<String> {
    std::env::var(TOKEN_ENV).ok()
}
