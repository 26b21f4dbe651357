// tests/propagation_test.rs
use image_tagger::boundary::BoundaryWarning;
use image_tagger::domain::AllowedMeta;
use image_tagger::propagation::{propagate, PropagationOptions, VersionTagPropagator};
use image_tagger::TaggerError;

const INFRACHECK: &str = "quay.io/riotkit/infracheck";
const BACKUP_REPOSITORY: &str = "quay.io/riotkit/backuprepository";

fn options(propagate_minor_major: bool, keep_prefix: bool) -> PropagationOptions {
    PropagationOptions {
        propagate_minor_major,
        add_global_latest: false,
        allowed_meta: AllowedMeta::parse("rc,alpha,stable,dev,prod,test,beta,build,b"),
        keep_prefix,
    }
}

fn image(repository: &str, tag: &str) -> String {
    format!("{}:{}", repository, tag)
}

fn images(repository: &str, tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| image(repository, tag)).collect()
}

// ============================================================================
// Releases
// ============================================================================

#[test]
fn test_release_with_prefix_kept() {
    let tags = propagate(&image(INFRACHECK, "v2.3.4"), &options(true, true)).unwrap();
    assert_eq!(tags, images(INFRACHECK, &["v2.3.4", "v2", "v2.3"]));
}

#[test]
fn test_release_with_prefix_removed() {
    let tags = propagate(&image(INFRACHECK, "v2.3.4"), &options(true, false)).unwrap();
    assert_eq!(tags, images(INFRACHECK, &["2.3.4", "2", "2.3"]));
}

#[test]
fn test_release_without_minor_major_propagation() {
    let tags = propagate(&image(INFRACHECK, "v2.3.4"), &options(false, true)).unwrap();
    assert_eq!(tags, images(INFRACHECK, &["v2.3.4"]));
}

#[test]
fn test_gradle_style_prefix_is_cut_off() {
    let tags = propagate(&image(BACKUP_REPOSITORY, "release-4.0.5"), &options(true, false)).unwrap();
    assert_eq!(tags, images(BACKUP_REPOSITORY, &["4.0.5", "4", "4.0"]));
}

#[test]
fn test_default_options_cut_off_prefix() {
    let tags = propagate("repo:release-4.0.5", &PropagationOptions::default()).unwrap();
    assert_eq!(tags, vec!["repo:4.0.5", "repo:4", "repo:4.0"]);
}

// ============================================================================
// Pre-releases
// ============================================================================

#[test]
fn test_release_candidate() {
    let tags = propagate(&image(INFRACHECK, "v2.0.0-rc1"), &options(false, true)).unwrap();
    assert_eq!(tags, images(INFRACHECK, &["v2.0.0-rc1", "v2.0.0-latest-rc"]));
}

#[test]
fn test_latest_per_version_for_dev_build() {
    let tags = propagate(
        &image(BACKUP_REPOSITORY, "release-4.0.5-dev1"),
        &options(true, false),
    )
    .unwrap();
    assert_eq!(
        tags,
        images(
            BACKUP_REPOSITORY,
            &["4.0.5-dev1", "4.0.5-latest-dev", "4-latest-dev", "4.0-latest-dev"]
        )
    );
}

#[test]
fn test_disallowed_meta_is_not_propagated() {
    let propagation = VersionTagPropagator::new(options(true, true))
        .propagate(&image(INFRACHECK, "1.0.0-foo1"))
        .unwrap();

    assert_eq!(propagation.tags, images(INFRACHECK, &["1.0.0-foo1"]));
    assert_eq!(
        propagation.warning,
        Some(BoundaryWarning::DisallowedMeta {
            tag: "1.0.0-foo1".to_string(),
            meta: "foo".to_string(),
        })
    );
}

// ============================================================================
// Latest tags
// ============================================================================

#[test]
fn test_global_latest() {
    let opts = PropagationOptions {
        add_global_latest: true,
        ..options(true, false)
    };
    let tags = propagate(&image(BACKUP_REPOSITORY, "release-4.0.5"), &opts).unwrap();

    assert!(tags.contains(&image(BACKUP_REPOSITORY, "latest")));
    assert_eq!(tags[1], image(BACKUP_REPOSITORY, "latest"));
}

// ============================================================================
// General properties
// ============================================================================

#[test]
fn test_original_image_comes_first() {
    for tag in ["v2.3.4", "2.0.0-rc1", "latest", "1.0.0-foo1", "release-4.0.5-dev1"] {
        let original = image(INFRACHECK, tag);
        let tags = propagate(&original, &options(true, true)).unwrap();
        assert_eq!(tags[0], original, "first entry for tag {}", tag);
    }
}

#[test]
fn test_tag_without_digits_returns_image_only() {
    for tag in ["latest", "stable", "edge-alpine", "v"] {
        let original = image(INFRACHECK, tag);
        let propagation = VersionTagPropagator::new(PropagationOptions {
            add_global_latest: true,
            ..options(true, false)
        })
        .propagate(&original)
        .unwrap();

        assert_eq!(propagation.tags, vec![original]);
        assert!(matches!(
            propagation.warning,
            Some(BoundaryWarning::NoVersionFound { .. })
        ));
    }
}

#[test]
fn test_propagation_is_deterministic() {
    let opts = options(true, false);
    let first = propagate(&image(BACKUP_REPOSITORY, "release-4.0.5-dev1"), &opts).unwrap();
    let second = propagate(&image(BACKUP_REPOSITORY, "release-4.0.5-dev1"), &opts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_registry_with_port_keeps_repository() {
    let tags = propagate("localhost:5000/app:1.2.3", &options(true, true)).unwrap();
    assert_eq!(
        tags,
        vec![
            "localhost:5000/app:1.2.3",
            "localhost:5000/app:1",
            "localhost:5000/app:1.2"
        ]
    );
}

#[test]
fn test_digest_reference_is_malformed() {
    let opts = PropagationOptions {
        add_global_latest: true,
        ..PropagationOptions::default()
    };
    let err = propagate("repo@sha256:ab12.cd", &opts).unwrap_err();
    assert!(matches!(err, TaggerError::MalformedReference(_)));
}

#[test]
fn test_reference_without_tag_is_malformed() {
    let err = propagate("localhost:5000/app", &options(true, true)).unwrap_err();
    assert!(matches!(err, TaggerError::MalformedReference(_)));
}
