use crate::*;
use std::sync::Arc;

/// Data-access component that loads its SQL from a [`QueryCatalog`].
///
/// Implementors only say where their queries live and which catalog serves
/// them:
/// ```rust
/// use utilitron::{MemoryProvider, QueryCatalog, QueryNamespace, Repository};
///
/// struct Users {
///     queries: QueryNamespace,
///     catalog: QueryCatalog,
/// }
///
/// impl Repository for Users {
///     fn namespace(&self) -> &QueryNamespace {
///         &self.queries
///     }
///     fn catalog(&self) -> &QueryCatalog {
///         &self.catalog
///     }
/// }
///
/// let users = Users {
///     queries: QueryNamespace::new("Acme.Users"),
///     catalog: QueryCatalog::new(MemoryProvider::from_iter([(
///         "Acme.UsersQueries.All.sql",
///         "select *\n    from users -- everyone",
///     )])),
/// };
/// assert_eq!(&*users.query("All").unwrap(), "select *\nfrom users ");
/// ```
pub trait Repository {
    fn namespace(&self) -> &QueryNamespace;

    fn catalog(&self) -> &QueryCatalog;

    /// Minified text of `query`, includes inlined. Cached by the catalog.
    fn query(&self, query: &str) -> Result<Arc<str>> {
        let id = self.namespace().resource(query)?;
        self.catalog().minified(&id)
    }

    /// Text of `query` with includes inlined but otherwise as written.
    fn query_raw(&self, query: &str) -> Result<Arc<str>> {
        let id = self.namespace().resource(query)?;
        self.catalog().raw(&id)
    }
}
