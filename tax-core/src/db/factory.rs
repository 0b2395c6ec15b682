use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{FinancialsRepository, RepositoryError};

/// Which storage backend to open, and how to reach it.
///
/// `connection_string` is opaque here; each backend interprets its own
/// (for SQLite: `tax_advisor.db`, `sqlite:data.db` or `:memory:`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl DbConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }
}

/// An ephemeral in-memory SQLite database.
impl Default for DbConfig {
    fn default() -> Self {
        Self::new("sqlite", ":memory:")
    }
}

/// Opens repositories for one storage backend.
///
/// Backend crates export a unit struct implementing this and callers
/// register it with a [`RepositoryRegistry`].
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name matched against [`DbConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Connects and brings the schema up to date before returning.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FinancialsRepository>, RepositoryError>;
}

/// Backend factories by name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        let name = factory.backend_name();
        if self.factories.insert(name, factory).is_some() {
            tracing::debug!(backend = name, "replaced repository factory");
        }
    }

    pub fn supports(
        &self,
        backend: &str,
    ) -> bool {
        self.factories.contains_key(backend)
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens a repository with the factory named by `config.backend`.
    ///
    /// Fails with [`RepositoryError::Configuration`] for an unregistered
    /// backend, otherwise with whatever the factory reports.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FinancialsRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "no storage backend named '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(backend = %config.backend, "opening repository");
        factory.create(config).await
    }
}
