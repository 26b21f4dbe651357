use crate::domain::natural::natural_sort;
use crate::error::{Result, TaggerError};
use crate::github::TagLister;
use regex::Regex;
use tracing::debug;

/// `%FIND_CLOSEST_RELEASE(owner/repo)%` inside build options
const CLOSEST_RELEASE_PLACEHOLDER: &str = r"%FIND_CLOSEST_RELEASE\(([^()%]+)\)%";

/// Finds the published tag a target version should be based on.
///
/// An exact match is returned as is. Otherwise the target is placed among the known
/// tags in descending natural order and the tag right below it wins; when the target
/// sorts lowest of all, the lowest known tag is used instead.
///
/// # Example
/// ```ignore
/// let known = vec!["1.0.0".to_string(), "1.1.0".to_string(), "1.3.0".to_string()];
/// assert_eq!(find_closest("1.2.0", &known), "1.1.0");
/// ```
pub fn find_closest(target: &str, known_tags: &[String]) -> String {
    if known_tags.iter().any(|tag| tag == target) {
        return target.to_string();
    }

    let mut sorted = known_tags.to_vec();
    sorted.push(target.to_string());
    natural_sort(&mut sorted);
    sorted.reverse();

    let last = sorted.len() - 1;
    if last == 0 {
        return target.to_string();
    }

    let position = sorted
        .iter()
        .position(|tag| tag == target)
        .unwrap_or(last);

    if position == last {
        sorted[last - 1].clone()
    } else {
        sorted[position + 1].clone()
    }
}

/// Resolves the closest published release of a repository
pub struct ClosestVersionResolver<L: TagLister> {
    lister: L,
}

impl<L: TagLister> ClosestVersionResolver<L> {
    /// Create a new resolver over a tag lister
    pub fn new(lister: L) -> Self {
        ClosestVersionResolver { lister }
    }

    /// List the repository tags and pick the one closest to `target`
    pub fn resolve(&self, repository: &str, target: &str) -> Result<String> {
        let known_tags = self.lister.list_tags(repository)?;
        let closest = find_closest(target, &known_tags);

        debug!(
            repository,
            target,
            closest = %closest,
            known = known_tags.len(),
            "resolved closest release"
        );

        Ok(closest)
    }

    /// Replace every `%FIND_CLOSEST_RELEASE(owner/repo)%` in `template` with the
    /// release of that repository closest to `target`.
    ///
    /// A template with such placeholders needs a target; without placeholders the
    /// template is returned unchanged and nothing is listed.
    pub fn expand_placeholders(&self, template: &str, target: Option<&str>) -> Result<String> {
        let re = Regex::new(CLOSEST_RELEASE_PLACEHOLDER)
            .map_err(|e| TaggerError::pattern(e.to_string()))?;

        let mut repositories: Vec<&str> = re
            .captures_iter(template)
            .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
            .collect();
        repositories.sort_unstable();
        repositories.dedup();

        if repositories.is_empty() {
            return Ok(template.to_string());
        }

        let target = target.ok_or_else(|| {
            TaggerError::config("an application version is required to resolve %FIND_CLOSEST_RELEASE(...)%")
        })?;

        let mut expanded = template.to_string();
        for repository in repositories {
            let closest = self.resolve(repository, target)?;
            expanded = expanded.replace(&format!("%FIND_CLOSEST_RELEASE({})%", repository), &closest);
        }

        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggerError;
    use crate::github::MockTagLister;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_exact_match_short_circuits() {
        assert_eq!(find_closest("1.1.0", &tags(&["1.0.0", "1.1.0"])), "1.1.0");
    }

    #[test]
    fn test_picks_nearest_lower_release() {
        let known = tags(&["1.0.0", "1.1.0", "1.3.0"]);
        assert_eq!(find_closest("1.2.0", &known), "1.1.0");
    }

    #[test]
    fn test_lowest_target_falls_back_to_lowest_known() {
        let known = tags(&["2.0.0", "1.0.0", "3.0.0"]);
        assert_eq!(find_closest("0.9.0", &known), "1.0.0");
    }

    #[test]
    fn test_highest_target_picks_newest() {
        let known = tags(&["v1.9", "v1.10", "v1.2"]);
        assert_eq!(find_closest("v2.0", &known), "v1.10");
    }

    #[test]
    fn test_empty_known_returns_target() {
        assert_eq!(find_closest("1.0.0", &[]), "1.0.0");
    }

    #[test]
    fn test_natural_not_lexicographic() {
        let known = tags(&["v9", "v10", "v12"]);
        assert_eq!(find_closest("v11", &known), "v10");
    }

    #[test]
    fn test_resolver_uses_lister() {
        let lister = MockTagLister::new().with_tags("a/b", &["1.0.0", "1.1.0", "1.3.0"]);
        let resolver = ClosestVersionResolver::new(lister);
        assert_eq!(resolver.resolve("a/b", "1.2.0").unwrap(), "1.1.0");
    }

    #[test]
    fn test_expand_placeholders_resolves_each_repository() {
        let lister = MockTagLister::new()
            .with_tags("taigaio/taiga-front-dist", &["4.2.0", "4.2.5", "5.0.0"])
            .with_tags("taigaio/taiga-events", &["1.0", "4.0"]);
        let resolver = ClosestVersionResolver::new(&lister);

        let expanded = resolver
            .expand_placeholders(
                "--build-arg FRONT=%FIND_CLOSEST_RELEASE(taigaio/taiga-front-dist)% \
                 --build-arg EVENTS=%FIND_CLOSEST_RELEASE(taigaio/taiga-events)%",
                Some("4.2.7"),
            )
            .unwrap();

        assert_eq!(expanded, "--build-arg FRONT=4.2.5 --build-arg EVENTS=4.0");
        assert_eq!(lister.calls(), 2);
    }

    #[test]
    fn test_expand_without_placeholders_lists_nothing() {
        let lister = MockTagLister::new();
        let resolver = ClosestVersionResolver::new(&lister);

        assert_eq!(
            resolver.expand_placeholders("--no-cache", None).unwrap(),
            "--no-cache"
        );
        assert_eq!(lister.calls(), 0);
    }

    #[test]
    fn test_expand_placeholders_requires_target() {
        let resolver = ClosestVersionResolver::new(MockTagLister::new());
        assert!(matches!(
            resolver.expand_placeholders("%FIND_CLOSEST_RELEASE(a/b)%", None),
            Err(TaggerError::Config(_))
        ));
    }

    #[test]
    fn test_resolver_propagates_lister_errors() {
        let resolver = ClosestVersionResolver::new(MockTagLister::new());
        assert!(matches!(
            resolver.resolve("ghost/repo", "1.0.0"),
            Err(TaggerError::RepositoryNotFound(_))
        ));
    }
}
