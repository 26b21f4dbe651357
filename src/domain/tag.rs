/// Matches the first dotted numeric version in a tag, with an optional
/// `-<letters>` pre-release label and trailing label number.
const VERSION_PATTERN: &str = r"(?P<version>\d+(?:\.\d+)*)(?:-(?P<meta>[A-Za-z]+))?(?P<metanum>\d+)?";

/// A tag split around its first recognizable version
/// (e.g., "release-4.0.5-dev1" -> prefix "release-", version "4.0.5", meta "dev", metanum "1")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub prefix: String,
    pub version: String,
    pub meta: Option<String>,
    pub metanum: Option<String>,
    pub suffix: String,
}

impl ParsedTag {
    /// Parse a tag, returning `None` when it holds no numeric version
    pub fn parse(tag: &str) -> Option<Self> {
        let re = regex::Regex::new(VERSION_PATTERN).ok()?;
        let captures = re.captures(tag)?;

        let whole = captures.get(0)?;
        let version = captures.name("version")?;

        Some(ParsedTag {
            prefix: tag[..whole.start()].to_string(),
            version: version.as_str().to_string(),
            meta: captures.name("meta").map(|m| m.as_str().to_string()),
            metanum: captures.name("metanum").map(|m| m.as_str().to_string()),
            suffix: tag[whole.end()..].to_string(),
        })
    }

    /// Progressive right-truncations of the version that are strictly shorter
    /// than it, shortest first: "2.1.3" -> ["2", "2.1"]
    pub fn sub_versions(&self) -> Vec<String> {
        let segments: Vec<&str> = self.version.split('.').collect();

        (1..segments.len())
            .map(|len| segments[..len].join("."))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_version() {
        let parsed = ParsedTag::parse("2.3.4").unwrap();
        assert_eq!(parsed.prefix, "");
        assert_eq!(parsed.version, "2.3.4");
        assert_eq!(parsed.meta, None);
        assert_eq!(parsed.metanum, None);
        assert_eq!(parsed.suffix, "");
    }

    #[test]
    fn test_parse_prefix_and_numbered_meta() {
        let parsed = ParsedTag::parse("release-4.0.5-dev1").unwrap();
        assert_eq!(parsed.prefix, "release-");
        assert_eq!(parsed.version, "4.0.5");
        assert_eq!(parsed.meta.as_deref(), Some("dev"));
        assert_eq!(parsed.metanum.as_deref(), Some("1"));
        assert!(parsed.meta.is_some());
    }

    #[test]
    fn test_parse_meta_without_number() {
        let parsed = ParsedTag::parse("v2.0.0-RC").unwrap();
        assert_eq!(parsed.prefix, "v");
        assert_eq!(parsed.meta.as_deref(), Some("RC"));
        assert_eq!(parsed.metanum, None);
    }

    #[test]
    fn test_parse_keeps_trailing_text() {
        let parsed = ParsedTag::parse("1.2.3_alpine").unwrap();
        assert_eq!(parsed.version, "1.2.3");
        assert_eq!(parsed.suffix, "_alpine");
    }

    #[test]
    fn test_parse_without_digits() {
        assert_eq!(ParsedTag::parse("latest"), None);
        assert_eq!(ParsedTag::parse(""), None);
        assert_eq!(ParsedTag::parse("my.image"), None);
    }

    #[test]
    fn test_sub_versions() {
        let parsed = ParsedTag::parse("2.1.3").unwrap();
        assert_eq!(parsed.sub_versions(), vec!["2", "2.1"]);
    }

    #[test]
    fn test_single_segment_has_no_sub_versions() {
        let parsed = ParsedTag::parse("v2").unwrap();
        assert!(parsed.sub_versions().is_empty());
    }
}
