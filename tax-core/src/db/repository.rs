use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FinancialRecord, NewFinancialRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for submitted salary records.
///
/// The engine never touches this; it exists so callers can keep what users
/// submitted and recompute later.
#[async_trait]
pub trait FinancialsRepository: Send + Sync {
    /// Persists a record under a freshly generated session id and timestamp.
    async fn save_financials(
        &self,
        record: NewFinancialRecord,
    ) -> Result<FinancialRecord, RepositoryError>;

    async fn get_financials(
        &self,
        session_id: Uuid,
    ) -> Result<FinancialRecord, RepositoryError>;

    /// Newest first; `limit` of `None` returns everything.
    async fn list_financials(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FinancialRecord>, RepositoryError>;

    async fn delete_financials(
        &self,
        session_id: Uuid,
    ) -> Result<(), RepositoryError>;
}
