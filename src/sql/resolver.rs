use crate::*;
use std::collections::HashSet;

/// Identifiers on the include chain above the text being resolved.
pub type Ancestors = HashSet<ResourceId>;

/// Written between an include directive and the text it pulls in.
pub const INCLUDE_SEPARATOR: &str = "\n";

/// Inlines include directives, recursively, rejecting cycles.
///
/// Each directive is replaced by itself, a line break, and the fully
/// resolved text of the included resource. Text outside directives is left
/// untouched.
///
/// Every include branch works on its own copy of the ancestor chain, so the
/// same resource may be included any number of times by siblings; only an
/// include of a resource that is already an ancestor fails, with
/// [`Error::CyclicInclude`].
#[derive(Debug, Clone)]
pub struct IncludeResolver<P> {
    provider: P,
    syntax: DirectiveSyntax,
}

impl<P: ResourceProvider> IncludeResolver<P> {
    pub fn new(provider: P) -> Self {
        Self::with_syntax(provider, DirectiveSyntax::default())
    }

    pub fn with_syntax(provider: P, syntax: DirectiveSyntax) -> Self {
        Self { provider, syntax }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn syntax(&self) -> &DirectiveSyntax {
        &self.syntax
    }

    /// Load `id` from the provider and resolve its includes.
    pub fn resolve(&self, id: &ResourceId) -> Result<String> {
        debug!("Resolving includes of {id}");
        let text = self.provider.text(id)?;
        self.resolve_text(&text, id)
    }

    /// Resolve the includes of already loaded text that lives at `id`.
    pub fn resolve_text(&self, text: &str, id: &ResourceId) -> Result<String> {
        self.expand(text, id, &Ancestors::new())
    }

    fn expand(&self, text: &str, parent: &ResourceId, ancestors: &Ancestors) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for directive in self.syntax.find_iter(text) {
            out.push_str(&text[last..directive.span.start]);
            out.push_str(&self.include(&directive, parent, ancestors)?);
            last = directive.span.end;
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    fn include(
        &self,
        directive: &IncludeDirective<'_>,
        parent: &ResourceId,
        ancestors: &Ancestors,
    ) -> Result<String> {
        let mut chain = ancestors.clone();
        chain.insert(parent.clone());

        let id = directive.path.resolve(parent)?;
        if chain.contains(&id) {
            warn!("{parent} includes its own ancestor {id}");
            return Err(Error::CyclicInclude { id });
        }

        trace!("{parent} includes {id} via {}", directive.path);
        let included = self.provider.text(&id)?;
        let included = self.expand(&included, &id, &chain)?;
        Ok([directive.text, INCLUDE_SEPARATOR, included.as_str()].concat())
    }
}
