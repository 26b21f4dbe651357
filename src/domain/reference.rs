use crate::error::{Result, TaggerError};
use std::fmt;
use std::str::FromStr;

/// A container image reference split into repository and tag
/// (e.g., "quay.io/riotkit/infracheck:v2.0.0")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    /// Create a reference from its parts
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        ImageReference {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    /// Parse `repository:tag`, splitting on the last colon.
    ///
    /// A colon followed by a path segment belongs to a registry port
    /// (`localhost:5000/app`), so such a reference has no tag at all. Digest
    /// references (`repo@sha256:...`) carry no tag either and are rejected.
    pub fn parse(image: &str) -> Result<Self> {
        if image.contains('@') {
            return Err(TaggerError::malformed(image));
        }

        let (repository, tag) = image
            .rsplit_once(':')
            .ok_or_else(|| TaggerError::malformed(image))?;

        if repository.is_empty() || tag.contains('/') {
            return Err(TaggerError::malformed(image));
        }

        Ok(ImageReference::new(repository, tag))
    }

    /// Render the same repository with another tag
    pub fn with_tag(&self, tag: &str) -> String {
        format!("{}:{}", self.repository, tag)
    }
}

impl FromStr for ImageReference {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        ImageReference::parse(s)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
