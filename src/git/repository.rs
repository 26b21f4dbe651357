use crate::error::Result;
use crate::git::TagInfo;
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tag_time(&self, tag_name: &str) -> Result<i64> {
        let reference = self.repo.find_reference(&format!("refs/tags/{}", tag_name))?;

        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(tagger) = tag.tagger() {
                return Ok(tagger.when().seconds());
            }
        }

        let commit = reference.peel_to_commit()?;
        Ok(commit.time().seconds())
    }
}

impl super::Repository for Git2Repository {
    fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;

        names
            .iter()
            .flatten()
            .map(|name| {
                Ok(TagInfo {
                    name: name.to_string(),
                    time: self.tag_time(name)?,
                })
            })
            .collect()
    }

    fn current_tag(&self) -> Result<Option<String>> {
        let head = self.repo.head()?.peel_to_commit()?.id();
        let names = self.repo.tag_names(None)?;

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            if reference.peel_to_commit()?.id() == head {
                return Ok(Some(name.to_string()));
            }
        }

        Ok(None)
    }
}
