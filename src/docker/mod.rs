//! Container image tool abstraction
//!
//! Tagging and pushing go through the [ImageTool] trait so the workflows can be
//! exercised without a docker daemon:
//!
//! - [cli::DockerCli]: shells out to the `docker` binary
//! - [mock::RecordingImageTool]: records every call for tests

pub mod cli;
pub mod mock;

pub use cli::DockerCli;
pub use mock::RecordingImageTool;

use crate::error::Result;
use tracing::info;

/// Operations on locally built images and their registry
pub trait ImageTool {
    /// Add `target` as another name for the local image `source`
    fn tag(&self, source: &str, target: &str) -> Result<()>;

    /// Upload an image reference to its registry
    fn push(&self, image: &str) -> Result<()>;

    /// Whether the registry already has the image reference
    fn exists(&self, image: &str) -> Result<bool>;
}

/// Tag `source` under every computed image reference, stopping at the first failure
pub fn tag_images<T: ImageTool + ?Sized>(tool: &T, source: &str, images: &[String]) -> Result<()> {
    for image in images {
        info!("Going to tag image \"{}\"", image);
        tool.tag(source, image)?;
    }
    Ok(())
}

/// Push every image reference in order, stopping at the first failure
pub fn push_images<T: ImageTool + ?Sized>(tool: &T, images: &[String]) -> Result<()> {
    for image in images {
        info!("Going to push image \"{}\"", image);
        tool.push(image)?;
    }
    Ok(())
}
