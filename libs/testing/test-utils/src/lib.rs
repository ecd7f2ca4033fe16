//! Shared test infrastructure for the domain crates.
//!
//! - `TestDatabase`: throwaway PostgreSQL container with migrations applied (feature `postgres`)
//! - `TestDataBuilder`: deterministic ids and names derived from the test name
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn stores_a_task() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("stores_a_task");
//!     let title = data.title("main");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded generator so reruns of a test produce identical data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from a hash of `name`; pass the test function's name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A UUID that is stable for this seed and `index`.
    pub fn id(&self, index: u64) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        bytes[8..].copy_from_slice(&index.to_le_bytes());
        Uuid::from_bytes(bytes)
    }

    /// `"test-<prefix>-<seed>-<suffix>"`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A task title unique to this test, well under the 200 character limit.
    pub fn title(&self, suffix: &str) -> String {
        self.name("task", suffix)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.id(0), b.id(0));
        assert_eq!(a.title("x"), b.title("x"));
    }

    #[test]
    fn ids_differ_by_index_and_test_name() {
        let a = TestDataBuilder::from_test_name("first");
        let b = TestDataBuilder::from_test_name("second");

        assert_ne!(a.id(0), a.id(1));
        assert_ne!(a.id(0), b.id(0));
    }

    #[test]
    fn titles_fit_the_column() {
        let title = TestDataBuilder::new(u64::MAX).title("a-fairly-long-suffix");
        assert!(title.chars().count() <= 200);
    }
}
