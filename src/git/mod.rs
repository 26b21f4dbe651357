//! Local git repository abstraction
//!
//! Provides the tag queries image-tagger needs from the repository an image is
//! built from, behind the [Repository] trait:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a mock implementation for testing
//!
//! ```rust
//! # use image_tagger::git::{MockRepository, Repository};
//! let repo = MockRepository::new().with_tag("v1.2.3", 100);
//! assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("v1.2.3"));
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::natural;
use crate::error::Result;
use std::cmp::Ordering;

/// Tag information used to order releases
#[derive(Debug, Clone, PartialEq)]
pub struct TagInfo {
    pub name: String,
    /// Tagger time for annotated tags, commit time for lightweight ones (unix seconds)
    pub time: i64,
}

/// Picks the most recent tag; equal times fall back to natural order
pub fn newest_tag(tags: &[TagInfo]) -> Option<&TagInfo> {
    tags.iter().max_by(|a, b| match a.time.cmp(&b.time) {
        Ordering::Equal => natural::compare(&a.name, &b.name),
        other => other,
    })
}

/// Tag queries against a repository
pub trait Repository {
    /// Get all tags with their timestamps
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Get a tag pointing exactly at HEAD, if any
    fn current_tag(&self) -> Result<Option<String>>;

    /// Get the most recently created tag
    fn latest_tag(&self) -> Result<Option<String>> {
        let tags = self.tags()?;
        Ok(newest_tag(&tags).map(|tag| tag.name.clone()))
    }
}
