use async_trait::async_trait;

use tax_core::db::repository::{FinancialsRepository, RepositoryError};
use tax_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// The `"sqlite"` storage backend.
///
/// ```rust,no_run
/// # async fn open() -> Result<(), tax_core::RepositoryError> {
/// use tax_core::db::{DbConfig, RepositoryRegistry};
/// use tax_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// let _repo = registry.create(&DbConfig::new("sqlite", "tax_advisor.db")).await?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// `connection_string` is a file path (created on first use), a
    /// `sqlite:` URL, or `:memory:`. Pending migrations run before the
    /// repository is handed out.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FinancialsRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        tracing::debug!(connection = %config.connection_string, "sqlite repository ready");
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::db::{DbConfig, RepositoryFactory, RepositoryRegistry};
    use tax_core::{NewFinancialRecord, RepositoryError};

    use super::SqliteRepositoryFactory;

    fn memory_config() -> DbConfig {
        DbConfig::new("sqlite", ":memory:")
    }

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_repository() {
        let result = SqliteRepositoryFactory.create(&memory_config()).await;

        assert!(
            result.is_ok(),
            "failed to create in-memory repository: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn created_repository_is_migrated() {
        let repo = SqliteRepositoryFactory
            .create(&memory_config())
            .await
            .expect("failed to create repository");

        let saved = repo
            .save_financials(NewFinancialRecord::default())
            .await
            .expect("save failed");

        assert_eq!(repo.list_financials(None).await.unwrap().len(), 1);
        assert_eq!(repo.get_financials(saved.session_id).await, Ok(saved));
    }

    #[tokio::test]
    async fn registry_dispatches_to_sqlite() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(SqliteRepositoryFactory));

        assert!(registry.create(&memory_config()).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_path_is_connection_error() {
        let config = DbConfig::new("sqlite", "/nonexistent-dir/sub/tax.db");

        let result = SqliteRepositoryFactory.create(&config).await;

        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }
}
