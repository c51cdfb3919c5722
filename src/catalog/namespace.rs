use crate::*;
use std::collections::HashMap;

/// Where a repository's query files live.
///
/// A repository registered as `Acme.Data.UserRepository` finds its query
/// `FindById` at `Acme.Data.UserRepositoryQueries.FindById.sql`. Queries a
/// repository shares with a base repository are registered explicitly with
/// [`QueryNamespace::inherit`], which points them at the base's folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNamespace {
    type_path: String,
    owners: HashMap<String, String>,
}

impl QueryNamespace {
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            owners: HashMap::new(),
        }
    }

    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// Serve `queries` from wherever `base` serves them.
    ///
    /// Inheritance chains: if `base` itself inherited a query, the query keeps
    /// pointing at the type that owns it.
    pub fn inherit<'q>(mut self, base: &QueryNamespace, queries: impl IntoIterator<Item = &'q str>) -> Self {
        for query in queries {
            self.owners
                .insert(query.to_string(), base.owner(query).to_string());
        }
        self
    }

    /// Type path owning the file of `query`.
    pub fn owner(&self, query: &str) -> &str {
        self.owners
            .get(query)
            .map(String::as_str)
            .unwrap_or(self.type_path.as_str())
    }

    /// Identifier of the file holding `query`.
    pub fn resource(&self, query: &str) -> Result<ResourceId> {
        if query.is_empty() {
            return Err(Error::InvalidArgument("query name must not be empty"));
        }
        Ok(ResourceId::for_query(self.owner(query), query))
    }
}
