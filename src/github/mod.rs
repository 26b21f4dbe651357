//! Tag listing abstraction layer
//!
//! This module provides a trait-based abstraction over "list the tags of a
//! repository", allowing the closest-release resolver and the release runner to
//! work against the real GitHub API or an in-memory fake.
//!
//! # Overview
//!
//! - [client::GitHubTagLister]: a single request against the GitHub REST API
//! - [retry::RetryingTagLister]: bounded retry with a fixed delay around any lister
//! - [mock::MockTagLister]: an in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use image_tagger::github::{MockTagLister, TagLister};
//! let lister = MockTagLister::new().with_tags("riotkit-org/infracheck", &["v1.0.0", "v1.1.0"]);
//! let tags = lister.list_tags("riotkit-org/infracheck").unwrap();
//! assert_eq!(tags.len(), 2);
//! ```

pub mod client;
pub mod mock;
pub mod retry;

pub use client::GitHubTagLister;
pub use mock::MockTagLister;
pub use retry::{RetryPolicy, RetryingTagLister};

use crate::error::Result;

/// Lists the tags published for a repository
///
/// ## Error Handling
///
/// Implementations report failures that may go away on their own (network,
/// unexpected responses) as transient errors, see
/// [crate::error::TaggerError::is_transient]; [RetryingTagLister] retries only those.
pub trait TagLister: Send + Sync {
    /// Get all tag names of a repository
    ///
    /// # Arguments
    /// * `repository` - Repository in `owner/name` form (e.g., "riotkit-org/file-repository")
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names in the order the remote returned them
    /// * `Err` - If the repository doesn't exist or the remote could not be queried
    fn list_tags(&self, repository: &str) -> Result<Vec<String>>;
}

impl<L: TagLister + ?Sized> TagLister for &L {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        (**self).list_tags(repository)
    }
}
