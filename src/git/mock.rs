use crate::error::Result;
use crate::git::{Repository, TagInfo};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<TagInfo>,
    head_tag: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            head_tag: None,
        }
    }

    /// Add a tag created at the given unix time
    pub fn with_tag(mut self, name: impl Into<String>, time: i64) -> Self {
        self.tags.push(TagInfo {
            name: name.into(),
            time,
        });
        self
    }

    /// Mark a tag as pointing at HEAD
    pub fn with_head_tag(mut self, name: impl Into<String>) -> Self {
        self.head_tag = Some(name.into());
        self
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self.tags.clone())
    }

    fn current_tag(&self) -> Result<Option<String>> {
        Ok(self.head_tag.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_latest_tag() {
        let repo = MockRepository::new()
            .with_tag("v1.0.0", 100)
            .with_tag("v1.1.0", 200);
        assert_eq!(repo.latest_tag().unwrap().as_deref(), Some("v1.1.0"));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.tags().unwrap().is_empty());
        assert_eq!(repo.latest_tag().unwrap(), None);
        assert_eq!(repo.current_tag().unwrap(), None);
    }
}
