use crate::error::{Result, TaggerError};
use crate::github::TagLister;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Mock tag lister for testing without network access
pub struct MockTagLister {
    tags: HashMap<String, Vec<String>>,
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl MockTagLister {
    /// Create a new lister that knows no repositories
    pub fn new() -> Self {
        MockTagLister {
            tags: HashMap::new(),
            failures_left: AtomicU32::new(0),
            calls: AtomicU32::new(0),
        }
    }

    /// Register the tags of a repository
    pub fn with_tags(mut self, repository: impl Into<String>, tags: &[&str]) -> Self {
        self.tags.insert(
            repository.into(),
            tags.iter().map(|tag| tag.to_string()).collect(),
        );
        self
    }

    /// Fail the next `count` calls with a transient remote error
    pub fn failing_times(self, count: u32) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    /// Number of `list_tags` calls so far
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTagLister {
    fn default() -> Self {
        Self::new()
    }
}

impl TagLister for MockTagLister {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(TaggerError::remote("simulated outage"));
        }

        self.tags
            .get(repository)
            .cloned()
            .ok_or_else(|| TaggerError::RepositoryNotFound(repository.to_string()))
    }
}
