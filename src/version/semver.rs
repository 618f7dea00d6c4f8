use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

/// Prefix shared by branch aliases such as `dev-master` or `dev-feature-x`
const UNRELEASED_PREFIX: &str = "dev";

/// First run of up to three dot-separated numeric components
static VERSION_CORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("version core pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Latest,
    Outdated,
    Newer,
}

/// Returns true for branch aliases that never correspond to a release.
pub fn is_unreleased(raw: &str) -> bool {
    raw.trim_start().starts_with(UNRELEASED_PREFIX)
}

/// Coerce an arbitrary version-like string into a canonical `major.minor.patch`.
///
/// Scheme prefixes (`v1.2.3`), constraint operators (`>=7.2`, `^7.4 || ^8.0`)
/// and pre-release or build suffixes (`2.4.0-beta1`, `1.0.0+build`) are
/// ignored; the first numeric core found wins. Returns `None` for branch
/// aliases and for strings without any digits.
///
/// Examples:
/// - "v2.4.0" -> Version(2, 4, 0)
/// - "3.1" -> Version(3, 1, 0)
/// - ">=7.2.5" -> Version(7, 2, 5)
/// - "dev-master" -> None
pub fn normalize(raw: &str) -> Option<Version> {
    if is_unreleased(raw) {
        return None;
    }

    let captures = VERSION_CORE.captures(raw)?;

    // Missing components default to zero; components too large for u64 yield None
    let component = |index: usize| {
        captures
            .get(index)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>())
            .ok()
    };

    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Total order over canonical versions: major, then minor, then patch.
pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
}

/// Compare a locked version against the latest published one.
pub fn compare_to_latest(locked: &Version, latest: &Version) -> CompareResult {
    match compare_versions(locked, latest) {
        Ordering::Less => CompareResult::Outdated,
        Ordering::Equal => CompareResult::Latest,
        Ordering::Greater => CompareResult::Newer,
    }
}
