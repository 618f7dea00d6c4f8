//! Running min/max over the PHP constraints declared by locked packages

use std::cmp::Ordering;

use semver::Version;

use crate::version::semver::{compare_versions, normalize};

/// Lowest and highest platform version seen so far.
///
/// Both bounds start unset, so the first valid observation always sets both.
/// Reconciliations run concurrently but never touch a shared tracker: each
/// returns its raw requirement and the audit folds them after the join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConstraintTracker {
    min: Option<Version>,
    max: Option<Version>,
}

impl PlatformConstraintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one raw constraint. Strings that do not normalize are ignored.
    pub fn observe(&mut self, raw: &str) {
        let Some(version) = normalize(raw) else {
            return;
        };

        if self
            .max
            .as_ref()
            .is_none_or(|max| compare_versions(&version, max) == Ordering::Greater)
        {
            self.max = Some(version.clone());
        }

        if self
            .min
            .as_ref()
            .is_none_or(|min| compare_versions(&version, min) == Ordering::Less)
        {
            self.min = Some(version);
        }
    }

    pub fn min(&self) -> Option<&Version> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref()
    }

    pub fn is_observed(&self) -> bool {
        self.min.is_some()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PlatformConstraintTracker {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tracker = Self::new();
        for raw in iter {
            tracker.observe(raw.as_ref());
        }
        tracker
    }
}
