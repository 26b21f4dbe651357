use std::collections::BTreeSet;

/// Pre-release labels allowed to propagate when no list is configured
pub const DEFAULT_ALLOWED_META: &[&str] = &[
    "rc",
    "alpha",
    "stable",
    "dev",
    "prod",
    "test",
    "beta",
    "build",
    "b",
    "pre",
    "a",
    "preprod",
    "prerelease",
    "early",
    "ea",
    "stage",
];

/// Case-insensitive set of pre-release labels permitted to propagate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMeta {
    labels: BTreeSet<String>,
}

impl AllowedMeta {
    /// Build the set from individual labels; labels are lower-cased and trimmed
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AllowedMeta {
            labels: labels
                .into_iter()
                .map(|label| label.as_ref().trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    /// Parse a comma separated list such as "rc, alpha,beta"
    pub fn parse(list: &str) -> Self {
        AllowedMeta::new(list.split(','))
    }

    /// Whether the label may propagate, ignoring case
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(&label.to_lowercase())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for AllowedMeta {
    fn default() -> Self {
        AllowedMeta::new(DEFAULT_ALLOWED_META.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contains_common_labels() {
        let allowed = AllowedMeta::default();
        for label in ["rc", "alpha", "beta", "dev", "stage"] {
            assert!(allowed.contains(label), "missing {}", label);
        }
        assert!(!allowed.contains("foo"));
    }

    #[test]
    fn test_parse_ignores_spaces_and_case() {
        let allowed = AllowedMeta::parse("RC, Beta ,dev,");
        assert!(allowed.contains("rc"));
        assert!(allowed.contains("BETA"));
        assert!(allowed.contains("dev"));
        assert_eq!(allowed.labels().count(), 3);
    }

    #[test]
    fn test_empty_list_allows_nothing() {
        let allowed = AllowedMeta::parse("");
        assert!(!allowed.contains("rc"));
        assert!(!allowed.contains(""));
    }
}
