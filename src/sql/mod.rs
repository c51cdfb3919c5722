//! Text-level processing of SQL query files.
//!
//! Neither pass parses SQL. Both work on raw text and accept anything,
//! including syntactically invalid queries.
//!
//! Modules:
//! - `line_break` : The set of line terminators the minifier understands.
//! - `minifier`   : Single pass comment / blank line / indentation stripper.
//! - `directive`  : `/* Include: path.sql */` matching and path resolution.
//! - `resolver`   : Recursive, cycle checked inlining of includes.
//!
//! Includes are resolved first, on the raw text, and the combined query is
//! minified afterwards:
//! ```rust
//! use utilitron::prelude::*;
//! use utilitron::MemoryProvider;
//!
//! let provider = MemoryProvider::from_iter([
//!     ("App.RepoQueries.Q.sql", "select\n  /* Include: Where.sql */"),
//!     ("App.RepoQueries.Where.sql", "-- filter\nwhere id = 1"),
//! ]);
//! let resolver = IncludeResolver::new(provider);
//! let resolved = resolver.resolve(&"App.RepoQueries.Q.sql".into()).unwrap();
//! assert_eq!(minify(&resolved), "select\nwhere id = 1");
//! ```
//!
//! NOTE: String literals are not recognised; comment markers inside them are
//! still treated as comments.

pub mod directive;
pub mod line_break;
pub mod minifier;
pub mod resolver;

pub use directive::{DEFAULT_KEYWORD, DirectiveSyntax, IncludeDirective, IncludePath, PATH_SEPARATORS};
pub use line_break::LineBreak;
pub use minifier::{minify, minify_opt};
pub use resolver::{Ancestors, INCLUDE_SEPARATOR, IncludeResolver};

/// Convenience prelude re-exporting the most commonly used items.
pub mod prelude {
    pub use super::{DirectiveSyntax, IncludeResolver, minify};
}
