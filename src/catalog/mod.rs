//! Cached access to resolved and minified queries.
//!
//! A [`QueryCatalog`] wraps an [`IncludeResolver`] with two caches keyed by
//! [`ResourceId`]:
//! - `raw`      : the query with its includes inlined.
//! - `minified` : the raw query passed through [`minify`].
//!
//! Both caches compute each key at most once, even under concurrent access;
//! callers racing on the same key wait for the single computation, while
//! unrelated keys proceed independently. Failed computations are not cached.

pub mod namespace;
pub mod repository;

pub use namespace::QueryNamespace;
pub use repository::Repository;

use crate::*;
use moka::sync::Cache;
use std::sync::Arc;

pub type SharedProvider = Arc<dyn ResourceProvider>;

#[derive(Clone)]
pub struct QueryCatalog {
    resolver: IncludeResolver<SharedProvider>,
    raw: Cache<ResourceId, Arc<str>>,
    minified: Cache<ResourceId, Arc<str>>,
}

impl QueryCatalog {
    /// Catalog over `provider` using the process wide [`config()`].
    ///
    /// Falls back to the default include keyword if the configured one is
    /// unusable.
    pub fn new(provider: impl ResourceProvider + 'static) -> Self {
        let provider: SharedProvider = Arc::new(provider);
        let config = config();
        let syntax = DirectiveSyntax::new(&config.include_keyword).unwrap_or_else(|e| {
            warn!("Ignoring include keyword {:?}: {e}", config.include_keyword);
            DirectiveSyntax::default()
        });
        Self::with_syntax(provider, syntax, config.cache_capacity)
    }

    pub fn with_config(provider: impl ResourceProvider + 'static, config: &Config) -> Result<Self> {
        let provider: SharedProvider = Arc::new(provider);
        let syntax = DirectiveSyntax::new(&config.include_keyword)?;
        Ok(Self::with_syntax(provider, syntax, config.cache_capacity))
    }

    fn with_syntax(provider: SharedProvider, syntax: DirectiveSyntax, capacity: u64) -> Self {
        Self {
            resolver: IncludeResolver::with_syntax(provider, syntax),
            raw: Cache::new(capacity),
            minified: Cache::new(capacity),
        }
    }

    pub fn resolver(&self) -> &IncludeResolver<SharedProvider> {
        &self.resolver
    }

    /// The query at `id` with all includes inlined, not minified.
    pub fn raw(&self, id: &ResourceId) -> Result<Arc<str>> {
        self.raw
            .try_get_with_by_ref(id, || -> Result<Arc<str>> {
                let text = self.resolver.resolve(id)?;
                debug!("Cached raw query {id} ({} bytes)", text.len());
                Ok(Arc::from(text))
            })
            .map_err(Arc::unwrap_or_clone)
    }

    /// The query at `id` with all includes inlined, then minified.
    pub fn minified(&self, id: &ResourceId) -> Result<Arc<str>> {
        self.minified
            .try_get_with_by_ref(id, || -> Result<Arc<str>> {
                let raw = self.raw(id)?;
                let text = minify(&raw);
                debug!("Cached minified query {id} ({} -> {} bytes)", raw.len(), text.len());
                Ok(Arc::from(text))
            })
            .map_err(Arc::unwrap_or_clone)
    }

    /// Drop every cached query; the next access reloads from the provider.
    pub fn invalidate_all(&self) {
        self.raw.invalidate_all();
        self.minified.invalidate_all();
    }
}

impl std::fmt::Debug for QueryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCatalog")
            .field("syntax", self.resolver.syntax())
            .field("raw", &self.raw.entry_count())
            .field("minified", &self.minified.entry_count())
            .finish()
    }
}
