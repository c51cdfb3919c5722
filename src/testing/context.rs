use crate::*;
use test_context::TestContext;
pub use test_context::test_context;

/// A catalog over the embedded fixture queries.
pub struct QueryFixtures {
    pub catalog: QueryCatalog,
}

impl TestContext for QueryFixtures {
    fn setup() -> Self {
        crate::testing::common_init();
        let catalog = QueryCatalog::with_config(embedded(), &Config::default())
            .expect("default configuration must be valid");
        Self { catalog }
    }

    fn teardown(self) {
        self.catalog.invalidate_all();
    }
}
