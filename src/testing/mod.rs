#![cfg(test)]
crate::reexport!(fixtures);
crate::reexport!(context);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod fixture_tests {
    use super::{super::*, *};

    #[test_context(QueryFixtures)]
    #[test]
    fn includes_included_queries(ctx: &mut QueryFixtures) -> Result {
        let expected = "before first include
/* Include: ./../RepositoryAncestorQueries/IncludeQueryInner.sql */
include query
after first include
before second include
/* Include: /Utilitron/Tests/Data/RepositoryAncestorQueries/IncludeQueryInner.sql */
include query
after second include";

        let repository = TestRepository::repository(&ctx.catalog);
        assert_eq!(&*repository.query_raw("IncludeQueryOuter")?, expected);
        assert_eq!(
            &*repository.query("IncludeQueryOuter")?,
            "before first include\ninclude query\nafter first include\nbefore second include\ninclude query\nafter second include"
        );
        Ok(())
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn recursive_include_is_rejected(ctx: &mut QueryFixtures) {
        let repository = TestRepository::repository(&ctx.catalog);
        let err = repository.query("IncludeQueryRecursive").unwrap_err();
        assert!(matches!(
            err,
            Error::CyclicInclude { ref id }
                if id.as_str() == "Utilitron.Tests.Data.RepositoryQueries.IncludeQueryRecursive.sql"
        ));
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn mutually_recursive_includes_are_rejected(ctx: &mut QueryFixtures) {
        let repository = TestRepository::repository(&ctx.catalog);
        let err = repository.query_raw("IncludeQueryMutualA").unwrap_err();
        assert!(matches!(
            err,
            Error::CyclicInclude { ref id }
                if id.as_str() == "Utilitron.Tests.Data.RepositoryQueries.IncludeQueryMutualA.sql"
        ));
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn strips_utf8_bom(ctx: &mut QueryFixtures) -> Result {
        let repository = TestRepository::ancestor(&ctx.catalog);
        let raw = repository.query_raw("Utf8Bom")?;
        assert!(!raw.starts_with('\u{FEFF}'));
        assert_eq!(&*raw, "UTF8BOM");
        assert_eq!(&*repository.query("Utf8Bom")?, "UTF8BOM");
        Ok(())
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn query_from_base_repository(ctx: &mut QueryFixtures) -> Result {
        let repository = TestRepository::ancestor2(&ctx.catalog);
        assert_eq!(
            repository.namespace().resource("QueryTest")?.as_str(),
            "Utilitron.Tests.Data.RepositoryAncestor1Queries.QueryTest.sql"
        );
        assert_eq!(&*repository.query("QueryTest")?, "QueryTest");
        Ok(())
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn own_query_not_registered_as_inherited_is_missing(ctx: &mut QueryFixtures) {
        let repository = TestRepository::ancestor2(&ctx.catalog);
        assert!(matches!(
            repository.query("Utf8Bom"),
            Err(Error::NotFound(ref id))
                if id.as_str() == "Utilitron.Tests.Data.RepositoryAncestor2Queries.Utf8Bom.sql"
        ));
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn underscore_namespace(ctx: &mut QueryFixtures) -> Result {
        let repository = TestRepository::underscore(&ctx.catalog);
        assert_eq!(&*repository.query("UnderscoreTest")?, "UnderscoreTest");
        Ok(())
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn empty_query_name_is_invalid(ctx: &mut QueryFixtures) {
        let repository = TestRepository::ancestor(&ctx.catalog);
        assert!(matches!(repository.query(""), Err(Error::InvalidArgument(_))));
        assert!(matches!(repository.query_raw(""), Err(Error::InvalidArgument(_))));
    }

    #[test_context(QueryFixtures)]
    #[test]
    fn included_nested_comment_and_indentation_are_minified(ctx: &mut QueryFixtures) -> Result {
        let repository = TestRepository::repository(&ctx.catalog);
        let expected = "select f.Id,
f.Name,
f.Colour,
f.Weight,
b.Label
from Fruit f
inner join Basket b
on b.Id = f.BasketId
";
        assert_eq!(&*repository.query("FruitBaskets")?, expected);
        Ok(())
    }

    #[rstest]
    #[case("IncludeQueryOuter")]
    #[case("FruitBaskets")]
    fn minified_fixtures_are_stable(#[case] query: &str) -> Result {
        common_init();
        let catalog = QueryCatalog::with_config(embedded(), &Config::default())?;
        let minified = TestRepository::repository(&catalog).query(query)?;
        assert_eq!(minify(&minified), *minified);
        Ok(())
    }

    #[test]
    fn directory_copy_matches_embedded_fixtures() -> Result {
        common_init();
        let directory = DirectoryProvider::new(fixtures_dir(), None)?;
        assert_eq!(directory.ids().count(), EMBEDDED.len());
        for (id, bytes) in EMBEDDED {
            let id = ResourceId::from(*id);
            assert_eq!(directory.load(&id)?.as_deref(), Some(*bytes), "{id}");
        }
        Ok(())
    }

    #[test]
    fn directory_provider_resolves_like_the_embedded_one() -> Result {
        common_init();
        let embedded = QueryCatalog::with_config(embedded(), &Config::default())?;
        let directory = QueryCatalog::with_config(
            DirectoryProvider::new(fixtures_dir().join("Utilitron"), Some("Utilitron"))?,
            &Config::default(),
        )?;
        let id = ResourceId::from(format!("{NAMESPACE}.RepositoryQueries.IncludeQueryOuter.sql"));
        assert_eq!(directory.minified(&id)?, embedded.minified(&id)?);
        Ok(())
    }
}
