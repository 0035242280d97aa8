//! Remote parameter lookup

use crate::api::ParameterStore;
use crate::error::{Result, StackError};

/// Fetch a parameter that must exist.
pub async fn require_parameter(store: &dyn ParameterStore, name: &str) -> Result<String> {
    store
        .get_parameter(name)
        .await?
        .ok_or_else(|| StackError::ParameterNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeParameterStore;

    #[tokio::test]
    async fn test_require_parameter() {
        let store = FakeParameterStore::new().with_parameter("/app/db-url", "postgres://db");

        let value = require_parameter(&store, "/app/db-url").await.unwrap();
        assert_eq!(value, "postgres://db");

        let err = require_parameter(&store, "/app/missing").await.unwrap_err();
        assert!(matches!(err, StackError::ParameterNotFound(_)));
    }
}
