/// Version assumed when a tag carries no dotted version at all
pub const INITIAL_VERSION: &str = "0.0.1";

/// Computes the next patch version from a tag.
///
/// Takes the first numeric run that contains a dot (so "rc-1" or "dev8" are skipped),
/// increments its third component and drops any prefix or suffix. A two-component
/// version gains a patch component of 1.
///
/// # Example
/// ```ignore
/// assert_eq!(increment_version("v1.2.3"), "1.2.4");
/// assert_eq!(increment_version("1.2"), "1.2.1");
/// assert_eq!(increment_version(""), "0.0.1");
/// ```
pub fn increment_version(tag: &str) -> String {
    let Some(version) = tag
        .split(|c: char| !c.is_ascii_digit() && c != '.')
        .map(|run| run.trim_matches('.'))
        .find(|run| run.contains('.'))
    else {
        return INITIAL_VERSION.to_string();
    };

    let mut parts: Vec<String> = version
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.len() >= 3 {
        parts[2] = bump_component(&parts[2]);
    } else {
        parts.push("1".to_string());
    }

    parts.join(".")
}

/// Adds one to a run of decimal digits of any length; leading zeros are dropped
fn bump_component(component: &str) -> String {
    let trimmed = component.trim_start_matches('0');
    let mut digits: Vec<u8> = trimmed.bytes().collect();

    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return String::from_utf8_lossy(&digits).into_owned();
        }
    }

    digits.insert(0, b'1');
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_patch() {
        assert_eq!(increment_version("1.2.3"), "1.2.4");
    }

    #[test]
    fn test_increment_strips_prefix_and_meta() {
        assert_eq!(increment_version("v1.2.3"), "1.2.4");
        assert_eq!(increment_version("release-4.0.9-rc1"), "4.0.10");
    }

    #[test]
    fn test_increment_carries_past_u64() {
        assert_eq!(
            increment_version("1.2.18446744073709551615"),
            "1.2.18446744073709551616"
        );
        assert_eq!(
            increment_version("v1.2.99999999999999999999999"),
            "1.2.100000000000000000000000"
        );
    }

    #[test]
    fn test_increment_drops_leading_zeros() {
        assert_eq!(increment_version("1.2.09"), "1.2.10");
        assert_eq!(increment_version("1.2.000"), "1.2.1");
    }

    #[test]
    fn test_increment_two_components() {
        assert_eq!(increment_version("1.2"), "1.2.1");
    }

    #[test]
    fn test_increment_keeps_extra_components() {
        assert_eq!(increment_version("1.2.3.4"), "1.2.4.4");
    }

    #[test]
    fn test_skips_runs_without_dot() {
        assert_eq!(increment_version("build8-2.0.0"), "2.0.1");
    }

    #[test]
    fn test_no_version_starts_fresh() {
        assert_eq!(increment_version(""), INITIAL_VERSION);
        assert_eq!(increment_version("latest"), INITIAL_VERSION);
        assert_eq!(increment_version("rc-1"), INITIAL_VERSION);
    }
}
