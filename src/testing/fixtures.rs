use crate::*;
use std::path::PathBuf;

/// Identifier prefix of every fixture query.
pub const NAMESPACE: &str = "Utilitron.Tests.Data";

macro_rules! embed {
    ([$($folder:literal),+], $file:literal) => {
        (
            concat!("Utilitron.Tests.Data", $(".", $folder,)+ ".", $file),
            include_bytes!(concat!("../../fixtures/Utilitron/Tests/Data", $("/", $folder,)+ "/", $file)) as &[u8],
        )
    };
}

/// Fixture queries compiled into the test binary.
pub const EMBEDDED: &[(&str, &[u8])] = &[
    embed!(["RepositoryQueries"], "IncludeQueryOuter.sql"),
    embed!(["RepositoryQueries"], "IncludeQueryRecursive.sql"),
    embed!(["RepositoryQueries"], "IncludeQueryMutualA.sql"),
    embed!(["RepositoryQueries"], "IncludeQueryMutualB.sql"),
    embed!(["RepositoryQueries"], "FruitBaskets.sql"),
    embed!(["RepositoryQueries"], "FruitColumns.sql"),
    embed!(["RepositoryAncestorQueries"], "IncludeQueryInner.sql"),
    embed!(["RepositoryAncestorQueries"], "QueryTest.sql"),
    embed!(["RepositoryAncestorQueries"], "Utf8Bom.sql"),
    embed!(["RepositoryAncestor1Queries"], "QueryTest.sql"),
    embed!(["_", "UnderscoreRepositoryQueries"], "UnderscoreTest.sql"),
];

pub fn embedded() -> MemoryProvider {
    EMBEDDED.iter().copied().collect()
}

/// The on-disk copy of the fixtures; its relative paths map onto the same
/// identifiers as [`EMBEDDED`].
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Repository used by the fixture tests, registered under one of the
/// fixture type paths.
pub struct TestRepository {
    queries: QueryNamespace,
    catalog: QueryCatalog,
}

impl TestRepository {
    fn new(queries: QueryNamespace, catalog: &QueryCatalog) -> Self {
        Self {
            queries,
            catalog: catalog.clone(),
        }
    }

    pub fn repository(catalog: &QueryCatalog) -> Self {
        Self::new(QueryNamespace::new(format!("{NAMESPACE}.Repository")), catalog)
    }

    pub fn ancestor(catalog: &QueryCatalog) -> Self {
        Self::new(QueryNamespace::new(format!("{NAMESPACE}.RepositoryAncestor")), catalog)
    }

    pub fn ancestor1(catalog: &QueryCatalog) -> Self {
        Self::new(QueryNamespace::new(format!("{NAMESPACE}.RepositoryAncestor1")), catalog)
    }

    /// Derives from `RepositoryAncestor1` without overriding `QueryTest`.
    pub fn ancestor2(catalog: &QueryCatalog) -> Self {
        let base = Self::ancestor1(catalog);
        let queries = QueryNamespace::new(format!("{NAMESPACE}.RepositoryAncestor2"))
            .inherit(base.namespace(), ["QueryTest"]);
        Self::new(queries, catalog)
    }

    pub fn underscore(catalog: &QueryCatalog) -> Self {
        Self::new(QueryNamespace::new(format!("{NAMESPACE}._.UnderscoreRepository")), catalog)
    }
}

impl Repository for TestRepository {
    fn namespace(&self) -> &QueryNamespace {
        &self.queries
    }

    fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }
}
