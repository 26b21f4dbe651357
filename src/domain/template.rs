/// Placeholder substitution for command and tag templates
/// (e.g., "release-%GIT_TAG%" with %GIT_TAG% = "1.0.5" -> "release-1.0.5")
///
/// Placeholders are replaced literally. Longer names go first so a name that is a
/// prefix of another one cannot corrupt it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    placeholders: Vec<(String, String)>,
}

pub const GIT_TAG: &str = "%GIT_TAG%";
pub const RELEASE_TAG: &str = "%RELEASE_TAG%";
pub const VERSION: &str = "%VERSION%";
pub const VERSION_TEMPLATE: &str = "%VERSION_TEMPLATE%";
pub const NEXT_VERSION: &str = "%NEXT_VERSION%";
pub const REBUILD_FLAG: &str = "%REBUILD_FLAG%";
pub const RELEASE_TASK: &str = "%RELEASE_TASK%";

/// Placeholder for the N-th regex capture group (0-based)
pub fn match_placeholder(index: usize) -> String {
    format!("%MATCH_{}%", index)
}

impl Template {
    pub fn new() -> Self {
        Template::default()
    }

    /// Add or replace a placeholder value
    pub fn with(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        let value = value.into();

        match self.placeholders.iter_mut().find(|(name, _)| *name == placeholder) {
            Some(entry) => entry.1 = value,
            None => self.placeholders.push((placeholder, value)),
        }
        self
    }

    /// Substitute every known placeholder in `text`
    pub fn render(&self, text: &str) -> String {
        let mut ordered: Vec<&(String, String)> = self.placeholders.iter().collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        ordered
            .into_iter()
            .fold(text.to_string(), |acc, (name, value)| acc.replace(name.as_str(), value))
    }
}
