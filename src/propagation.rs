//! Tag propagation: one concrete image tag fans out into less specific tags
//! (patch -> minor -> major -> latest).
//!
//! Examples:
//! - `repo:1.2.3`      -> `repo:1.2.3`, `repo:1`, `repo:1.2`
//! - `repo:v2.0.0-rc1` -> `repo:v2.0.0-rc1`, `repo:v2.0.0-latest-rc`, ...

use crate::boundary::BoundaryWarning;
use crate::domain::{AllowedMeta, ImageReference, ParsedTag};
use crate::error::Result;
use tracing::{debug, warn};

/// Switches controlling which tags are generated
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationOptions {
    /// Also emit shorter versions (1.2.3 -> 1.2 -> 1)
    pub propagate_minor_major: bool,
    /// Also emit `latest`
    pub add_global_latest: bool,
    pub allowed_meta: AllowedMeta,
    /// Keep text before the version ("v", "release-") in generated tags
    pub keep_prefix: bool,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        PropagationOptions {
            propagate_minor_major: true,
            add_global_latest: false,
            allowed_meta: AllowedMeta::default(),
            keep_prefix: false,
        }
    }
}

/// Outcome of a propagation: the tags plus the reason when nothing could be propagated
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// Full image references, the original one first
    pub tags: Vec<String>,
    pub warning: Option<BoundaryWarning>,
}

impl Propagation {
    fn identity(image: &str, warning: BoundaryWarning) -> Self {
        Propagation {
            tags: vec![image.to_string()],
            warning: Some(warning),
        }
    }
}

/// Computes the tag set that mirrors one image tag at decreasing specificity
#[derive(Debug, Clone, Default)]
pub struct VersionTagPropagator {
    options: PropagationOptions,
}

impl VersionTagPropagator {
    pub fn new(options: PropagationOptions) -> Self {
        VersionTagPropagator { options }
    }

    /// Compute all tags for `image` (`repository:tag`).
    ///
    /// Tags without a recognizable version, or with a pre-release label outside the
    /// allowed list, yield only the original image together with a warning.
    ///
    /// # Errors
    /// `MalformedReference` when `image` has no tag separator.
    pub fn propagate(&self, image: &str) -> Result<Propagation> {
        let reference = ImageReference::parse(image)?;

        let Some(parsed) = ParsedTag::parse(&reference.tag) else {
            let warning = BoundaryWarning::NoVersionFound {
                tag: reference.tag.clone(),
            };
            warn!(image, "{}", warning);
            return Ok(Propagation::identity(image, warning));
        };

        if let Some(meta) = &parsed.meta {
            if !self.options.allowed_meta.contains(meta) {
                let warning = BoundaryWarning::DisallowedMeta {
                    tag: reference.tag.clone(),
                    meta: meta.clone(),
                };
                warn!(image, "{}", warning);
                return Ok(Propagation::identity(image, warning));
            }
        }

        let mut tags = vec![reference.tag.clone()];

        if self.options.add_global_latest {
            tags.push("latest".to_string());
        }

        match &parsed.meta {
            // 1.0.0-rc1 and 1.0.0-rc both collapse into 1.0.0-latest-rc
            Some(meta) => {
                tags.push(format!("{}{}-latest-{}", parsed.prefix, parsed.version, meta));

                if self.options.propagate_minor_major {
                    for sub_version in parsed.sub_versions() {
                        tags.push(format!(
                            "{}{}-latest-{}{}",
                            parsed.prefix, sub_version, meta, parsed.suffix
                        ));
                    }
                }
            }
            None => {
                if self.options.propagate_minor_major {
                    for sub_version in parsed.sub_versions() {
                        tags.push(format!("{}{}{}", parsed.prefix, sub_version, parsed.suffix));
                    }
                }
            }
        }

        if !self.options.keep_prefix && !parsed.prefix.is_empty() {
            tags = strip_prefix_from_tags(tags, &parsed.prefix);
        }

        let tags: Vec<String> = tags.iter().map(|tag| reference.with_tag(tag)).collect();
        debug!(image, count = tags.len(), "computed tag propagation");

        Ok(Propagation {
            tags,
            warning: None,
        })
    }
}

/// Removes a prefix such as "release-" or "v" from the start of every tag that carries it
pub fn strip_prefix_from_tags(tags: Vec<String>, prefix: &str) -> Vec<String> {
    tags.into_iter()
        .map(|tag| match tag.strip_prefix(prefix) {
            Some(stripped) => stripped.to_string(),
            None => tag,
        })
        .collect()
}

/// Convenience wrapper returning only the computed image references
pub fn propagate(image: &str, options: &PropagationOptions) -> Result<Vec<String>> {
    VersionTagPropagator::new(options.clone())
        .propagate(image)
        .map(|propagation| propagation.tags)
}
