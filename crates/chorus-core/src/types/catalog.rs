//! Content catalog descriptors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a course (content group).
///
/// The portal reports it either as a number or a numeric string depending
/// on the listing; both decode to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CourseId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| serde::de::Error::custom(format!("invalid course id '{s}'"))),
        }
    }
}

/// A catalog entry, normalized from either material listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// The course the material belongs to.
    pub course: CourseId,
    /// Whether the material may be downloaded.
    #[serde(rename = "is_download", default)]
    pub downloadable: bool,
}

impl ContentDescriptor {
    /// Creates a descriptor.
    pub fn new(course: impl Into<CourseId>, downloadable: bool) -> Self {
        Self {
            course: course.into(),
            downloadable,
        }
    }
}

/// Which material listing a catalog query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEndpoint {
    /// Staff listing, used for restricted-role callers. Takes `course` as a
    /// string parameter.
    Staff,
    /// Client listing, used for everyone else. Takes `course` as a number.
    Client,
}

/// A role-specific catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    /// Target listing.
    pub endpoint: CatalogEndpoint,
    /// Course filter.
    pub course: CourseId,
    /// Only list downloadable materials.
    pub downloadable_only: bool,
}

impl CatalogQuery {
    /// Query parameters in wire order.
    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            ("is_download".to_string(), self.downloadable_only.to_string()),
            ("course".to_string(), self.course.to_string()),
        ]
    }
}
