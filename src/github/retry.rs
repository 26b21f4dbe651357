use crate::error::{Result, TaggerError};
use crate::github::TagLister;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `retries + 1` requests at most
    pub retries: u32,
    pub wait: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, wait: Duration) -> Self {
        RetryPolicy { retries, wait }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(5, Duration::from_secs(5))
    }
}

/// Wraps a lister and retries transient failures.
///
/// Blocks the calling thread for up to `retries * wait` in the worst case, then fails
/// with `TagListUnavailable`. Permanent errors (e.g. a missing repository) are
/// returned on the first occurrence.
pub struct RetryingTagLister<L> {
    inner: L,
    policy: RetryPolicy,
}

impl<L: TagLister> RetryingTagLister<L> {
    pub fn new(inner: L, policy: RetryPolicy) -> Self {
        RetryingTagLister { inner, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

impl<L: TagLister> TagLister for RetryingTagLister<L> {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            match self.inner.list_tags(repository) {
                Ok(tags) => return Ok(tags),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) if attempt >= max_attempts => {
                    return Err(TaggerError::TagListUnavailable {
                        repository: repository.to_string(),
                        attempts: attempt,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        repository,
                        attempt,
                        max_attempts,
                        "Listing tags failed, retrying in {:?}: {}",
                        self.policy.wait,
                        e
                    );
                    thread::sleep(self.policy.wait);
                    attempt += 1;
                }
            }
        }
    }
}
