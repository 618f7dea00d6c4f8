//! Common types for Composer manifests

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Requirement key holding the PHP version constraint of a package
pub const PLATFORM_REQUIREMENT: &str = "php";

/// Mapping from dependency name to raw version constraint
pub type Requirements = IndexMap<String, String>;

/// Accepts a requirements object, or the empty array PHP's `json_encode`
/// writes for an empty one.
struct RequirementsVisitor;

impl<'de> Visitor<'de> for RequirementsVisitor {
    type Value = Requirements;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of package names to version constraints")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Requirements, A::Error> {
        let mut requirements = Requirements::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, constraint)) = map.next_entry::<String, String>()? {
            requirements.insert(name, constraint);
        }
        Ok(requirements)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Requirements, E> {
        Ok(Requirements::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Requirements, A::Error> {
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_type(de::Unexpected::Seq, &self));
        }
        Ok(Requirements::new())
    }
}

fn requirements<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Requirements, D::Error> {
    deserializer.deserialize_any(RequirementsVisitor)
}

struct Section(Requirements);

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        requirements(deserializer).map(Section)
    }
}

/// A `null` section counts as absent
fn optional_requirements<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Requirements>, D::Error> {
    Ok(Option::<Section>::deserialize(deserializer)?.map(|section| section.0))
}

/// Parsed `composer.json`
///
/// Both sections are optional at the parse level; the audit decides whether
/// an absent section is fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementsManifest {
    #[serde(default, deserialize_with = "optional_requirements")]
    pub require: Option<Requirements>,
    #[serde(
        default,
        rename = "require-dev",
        deserialize_with = "optional_requirements"
    )]
    pub require_dev: Option<Requirements>,
}

impl RequirementsManifest {
    /// Names requested in either `require` or `require-dev`
    pub fn requested_names(&self) -> impl Iterator<Item = &str> {
        self.require
            .iter()
            .chain(self.require_dev.iter())
            .flat_map(|reqs| reqs.keys().map(String::as_str))
    }
}

/// Parsed `composer.lock`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LockManifest {
    pub packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    pub packages_dev: Vec<LockedPackage>,
}

impl LockManifest {
    /// Runtime packages followed by dev packages, in lock order
    pub fn all_packages(&self) -> impl Iterator<Item = &LockedPackage> {
        self.packages.iter().chain(self.packages_dev.iter())
    }
}

/// A package entry with an exact resolved version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    /// Raw locked version, e.g. `v1.2.3` or `dev-master`
    pub version: String,
    #[serde(default, deserialize_with = "requirements")]
    pub require: Requirements,
    #[serde(default, rename = "require-dev", deserialize_with = "requirements")]
    pub require_dev: Requirements,
}

impl LockedPackage {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            require: Requirements::new(),
            require_dev: Requirements::new(),
        }
    }

    /// `require` merged with `require-dev`; dev entries win on key clashes
    pub fn declared_requirements(&self) -> Requirements {
        let mut merged = self.require.clone();
        for (name, constraint) in &self.require_dev {
            merged.insert(name.clone(), constraint.clone());
        }
        merged
    }

    /// Raw PHP constraint declared by this package, if any
    pub fn platform_requirement(&self) -> Option<String> {
        self.declared_requirements()
            .swap_remove(PLATFORM_REQUIREMENT)
    }
}
