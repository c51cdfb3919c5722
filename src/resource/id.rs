use derive_more::{AsRef, Display, From, Into};
use itertools::Itertools as _;

/// Dot-separated logical name of a text resource, e.g.
/// `Acme.Data.UserRepositoryQueries.FindById.sql`.
///
/// The identifier doubles as a cache key and as the base for resolving
/// relative include paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, AsRef)]
#[as_ref(forward)]
pub struct ResourceId(String);

impl ResourceId {
    pub const SEPARATOR: char = '.';

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the query file belonging to a repository type:
    /// `{owner}Queries.{query}.sql`.
    pub fn for_query(owner: &str, query: &str) -> Self {
        Self(format!("{owner}Queries.{query}.sql"))
    }

    /// Build an identifier from already separated segments.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        Self(segments.into_iter().join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty dot separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::ops::Deref for ResourceId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}
