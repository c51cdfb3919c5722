//! Embedded SQL query loading for data-access layers.
//!
//! Queries live as text resources addressed by dotted identifiers such as
//! `Acme.Data.UserRepositoryQueries.FindById.sql`. A [`QueryCatalog`] fetches
//! them through a [`ResourceProvider`], inlines `/* Include: other.sql */`
//! directives and minifies the result, caching both forms per identifier.
//!
//! ```rust
//! use utilitron::{MemoryProvider, QueryCatalog, ResourceId};
//!
//! let provider = MemoryProvider::from_iter([
//!     ("Acme.Data.UsersQueries.Columns.sql", "id,\n    name"),
//!     ("Acme.Data.UsersQueries.All.sql", "select\n/* Include: Columns.sql */\n-- everything\nfrom users"),
//! ]);
//! let catalog = QueryCatalog::new(provider);
//! let query = catalog.minified(&ResourceId::from("Acme.Data.UsersQueries.All.sql")).unwrap();
//! assert_eq!(&*query, "select\nid,\nname\nfrom users");
//! ```
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(resource);
reexport!(sql);
reexport!(catalog);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
