//! Include directives embedded in query text.
//!
//! A directive is a comment of the form `/* Include: <path>.sql */` where the
//! path is made of ASCII alphanumerics, `/`, `\` and `.`. Paths starting with a
//! separator are absolute resource paths; everything else is relative to the
//! directory-equivalent of the including resource.
//!
//! Directives are recognised anywhere in the text, including inside what would
//! otherwise be an ordinary comment.
use crate::*;
use regex::Regex;
use std::{ops::Range, sync::LazyLock};

/// Characters separating include path segments.
pub const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

pub const DEFAULT_KEYWORD: &str = "Include";

/// Compiled matcher for include directives using a given keyword.
#[derive(Debug, Clone)]
pub struct DirectiveSyntax {
    keyword: String,
    regex: Regex,
}

impl DirectiveSyntax {
    pub fn new(keyword: &str) -> Result<Self> {
        if keyword.is_empty() {
            return Err(Error::Config("include keyword must not be empty".to_string()));
        }
        let regex = Regex::new(&format!(
            r"/\*\s+{}:\s+([0-9a-zA-Z/\\.]+\.sql)\s+\*/",
            regex::escape(keyword)
        ))?;
        Ok(Self {
            keyword: keyword.to_string(),
            regex,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Directives in `text`, left to right, non-overlapping.
    pub fn find_iter<'a, 't>(&'a self, text: &'t str) -> impl Iterator<Item = IncludeDirective<'t>> + 'a
    where
        't: 'a,
    {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some(IncludeDirective {
                span: whole.range(),
                text: whole.as_str(),
                path: IncludePath::parse(path.as_str()),
            })
        })
    }
}

impl Default for DirectiveSyntax {
    fn default() -> Self {
        static DEFAULT: LazyLock<DirectiveSyntax> = LazyLock::new(|| {
            DirectiveSyntax::new(DEFAULT_KEYWORD).expect("default include syntax must compile")
        });
        DEFAULT.clone()
    }
}

/// One include directive found in a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective<'t> {
    /// Byte range of the whole directive in the scanned text.
    pub span: Range<usize>,
    /// The directive exactly as written.
    pub text: &'t str,
    pub path: IncludePath<'t>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludePath<'t> {
    /// Starts with a separator; maps directly onto a dotted identifier.
    Absolute(&'t str),
    /// Resolved against the including resource.
    Relative(&'t str),
}

impl<'t> IncludePath<'t> {
    pub fn parse(path: &'t str) -> Self {
        if path.starts_with(PATH_SEPARATORS) {
            IncludePath::Absolute(path)
        } else {
            IncludePath::Relative(path)
        }
    }

    pub fn as_str(&self) -> &'t str {
        match *self {
            IncludePath::Absolute(p) | IncludePath::Relative(p) => p,
        }
    }

    /// Identifier of the included resource when included from `parent`.
    ///
    /// Relative paths start from `parent` minus its last two segments, which
    /// for `Ns.TypeQueries.Name.sql` is the `Ns.TypeQueries` folder. The two
    /// segments are dropped unconditionally, whatever the parent's shape.
    pub fn resolve(&self, parent: &ResourceId) -> Result<ResourceId> {
        match *self {
            IncludePath::Absolute(path) => Ok(ResourceId::new(
                path.trim_matches(PATH_SEPARATORS).replace(PATH_SEPARATORS, "."),
            )),
            IncludePath::Relative(path) => {
                let parent_segments = parent.segments().collect::<Vec<_>>();
                let mut segments = parent_segments[..parent_segments.len().saturating_sub(2)].to_vec();
                for part in path.split(PATH_SEPARATORS).filter(|p| !p.is_empty()) {
                    match part {
                        "." => {}
                        ".." => {
                            if segments.pop().is_none() {
                                return Err(Error::InvalidIncludePath {
                                    path: path.to_string(),
                                    parent: parent.clone(),
                                });
                            }
                        }
                        other => segments.push(other),
                    }
                }
                Ok(ResourceId::from_segments(segments))
            }
        }
    }
}

impl std::fmt::Display for IncludePath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const OUTER: &str = "Utilitron.Tests.Data.RepositoryQueries.IncludeQueryOuter.sql";

    #[rstest]
    #[case::parent_then_sibling_folder(
        "./../RepositoryAncestorQueries/IncludeQueryInner.sql",
        "Utilitron.Tests.Data.RepositoryAncestorQueries.IncludeQueryInner.sql"
    )]
    #[case::same_folder("IncludeQueryInner.sql", "Utilitron.Tests.Data.RepositoryQueries.IncludeQueryInner.sql")]
    #[case::sub_folder("Includes/Sub.sql", "Utilitron.Tests.Data.RepositoryQueries.Includes.Sub.sql")]
    #[case::backslashes(r"..\Other\X.sql", "Utilitron.Tests.Data.Other.X.sql")]
    #[case::repeated_separators(".//Includes\\\\Sub.sql", "Utilitron.Tests.Data.RepositoryQueries.Includes.Sub.sql")]
    #[case::absolute(
        "/Utilitron/Tests/Data/RepositoryAncestorQueries/IncludeQueryInner.sql",
        "Utilitron.Tests.Data.RepositoryAncestorQueries.IncludeQueryInner.sql"
    )]
    #[case::absolute_backslashes(r"\A\B.sql", "A.B.sql")]
    fn resolves_against_parent(#[case] path: &str, #[case] expected: &str) {
        let resolved = IncludePath::parse(path).resolve(&OUTER.into()).unwrap();
        assert_eq!(resolved.as_str(), expected);
    }

    #[test]
    fn parent_without_extension_loses_an_extra_segment() {
        // Exactly two segments are dropped, so a parent that is not shaped
        // like `Ns.TypeQueries.Name.sql` resolves one folder higher.
        let resolved = IncludePath::parse("D.sql").resolve(&"A.BQueries.C".into()).unwrap();
        assert_eq!(resolved.as_str(), "A.D.sql");
    }

    #[test]
    fn climbing_above_the_root_is_rejected() {
        let err = IncludePath::parse("../x.sql").resolve(&"A.sql".into()).unwrap_err();
        assert!(matches!(err, Error::InvalidIncludePath { ref path, .. } if path == "../x.sql"));
    }

    #[test]
    fn classifies_paths() {
        assert!(matches!(IncludePath::parse("/a.sql"), IncludePath::Absolute(_)));
        assert!(matches!(IncludePath::parse(r"\a.sql"), IncludePath::Absolute(_)));
        assert!(matches!(IncludePath::parse("./a.sql"), IncludePath::Relative(_)));
        assert_eq!(IncludePath::parse("a/b.sql").to_string(), "a/b.sql");
    }

    #[test]
    fn finds_directives_in_order() {
        let text = "a /* Include: one.sql */ b /*  Include:\ttwo/three.sql\n*/ c";
        let found = DirectiveSyntax::default().find_iter(text).collect::<Vec<_>>();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "/* Include: one.sql */");
        assert_eq!(found[0].path, IncludePath::Relative("one.sql"));
        assert_eq!(&text[found[0].span.clone()], found[0].text);
        assert_eq!(found[1].path.as_str(), "two/three.sql");
    }

    #[rstest]
    #[case::no_space_after_open("/*Include: a.sql */")]
    #[case::not_sql("/* Include: a.txt */")]
    #[case::dash_in_path("/* Include: my-file.sql */")]
    #[case::no_space_before_close("/* Include: a.sql*/")]
    #[case::other_keyword("/* Import: a.sql */")]
    fn ignores_non_directives(#[case] text: &str) {
        assert_eq!(DirectiveSyntax::default().find_iter(text).count(), 0);
    }

    #[test]
    fn custom_keyword_is_matched_literally() {
        let syntax = DirectiveSyntax::new("Utilitron.Include").unwrap();
        assert_eq!(syntax.keyword(), "Utilitron.Include");
        assert_eq!(syntax.find_iter("/* Utilitron.Include: a.sql */").count(), 1);
        assert_eq!(syntax.find_iter("/* UtilitronXInclude: a.sql */").count(), 0);
        assert_eq!(syntax.find_iter("/* Include: a.sql */").count(), 0);
    }

    #[test]
    fn empty_keyword_is_a_config_error() {
        assert!(matches!(DirectiveSyntax::new(""), Err(Error::Config(_))));
    }
}
