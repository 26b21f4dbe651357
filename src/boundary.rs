use std::fmt;

/// Warnings raised when an input tag sits outside what the tool can act on.
/// These are non-fatal: the caller still gets a valid (degenerate) result.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The tag carries no dotted numeric version, nothing to propagate
    NoVersionFound { tag: String },
    /// The pre-release label is not in the allowed list
    DisallowedMeta { tag: String, meta: String },
    /// A release tag did not match the configured filter expression
    UnmatchedReleaseTag { tag: String, pattern: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionFound { tag } => {
                write!(f, "No release version found in tag '{}'", tag)
            }
            BoundaryWarning::DisallowedMeta { tag, meta } => {
                write!(
                    f,
                    "Version meta part '{}' of tag '{}' is not allowed, not calculating propagation",
                    meta, tag
                )
            }
            BoundaryWarning::UnmatchedReleaseTag { tag, pattern } => {
                write!(f, "Tag '{}' does not match pattern '{}'", tag, pattern)
            }
        }
    }
}
