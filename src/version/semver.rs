use semver::Version;

/// Whether a value extracted from a manifest is a full semantic version.
///
/// A leading `v` is accepted, so `v1.0.0` passes; the value itself is kept
/// verbatim by callers. Partial versions such as `1` or `1.2` are rejected.
pub fn is_semver(version: &str) -> bool {
    let version = version.trim();
    let unprefixed = version
        .strip_prefix(['v', 'V'])
        .unwrap_or(version);
    Version::parse(unprefixed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0", true)]
    #[case("v1.0.0", true)]
    #[case("V2.3.4", true)]
    #[case("1.0.0+build", true)]
    #[case("2.0.0-rc.1", true)]
    #[case("1", false)]
    #[case("2", false)]
    #[case("1.2", false)]
    #[case("0.4", false)]
    #[case("v1", false)]
    #[case("invalid", false)]
    #[case("", false)]
    #[case("1.0.0.0", false)]
    #[case("latest", false)]
    fn test_is_semver(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_semver(input), expected);
    }
}
