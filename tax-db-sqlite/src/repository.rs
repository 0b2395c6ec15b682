use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tax_core::{FinancialRecord, FinancialsRepository, NewFinancialRecord, RepositoryError};
use uuid::Uuid;

use crate::decimal::{decimal_to_text, get_optional_decimal};

const SELECT_COLUMNS: &str = "SELECT session_id, gross_salary, basic_salary, hra_received,
        rent_paid, deduction_80c, deduction_80d, standard_deduction,
        professional_tax, tds, created_at
 FROM user_financials";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to `database_url`, creating the database file if needed.
    ///
    /// Accepts sqlx URLs (`sqlite:data.db`, `sqlite::memory:`) as well as bare
    /// paths and `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_financial_record(
    row: &sqlx::sqlite::SqliteRow
) -> Result<FinancialRecord, RepositoryError> {
    let session_id: String = row
        .try_get("session_id")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

    Ok(FinancialRecord {
        session_id: Uuid::parse_str(&session_id).map_err(|e| {
            RepositoryError::Database(format!("Invalid session id '{}': {}", session_id, e))
        })?,
        gross_salary: get_optional_decimal(row, "gross_salary")?,
        basic_salary: get_optional_decimal(row, "basic_salary")?,
        hra_received: get_optional_decimal(row, "hra_received")?,
        rent_paid: get_optional_decimal(row, "rent_paid")?,
        deduction_80c: get_optional_decimal(row, "deduction_80c")?,
        deduction_80d: get_optional_decimal(row, "deduction_80d")?,
        standard_deduction: get_optional_decimal(row, "standard_deduction")?,
        professional_tax: get_optional_decimal(row, "professional_tax")?,
        tds: get_optional_decimal(row, "tds")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                RepositoryError::Database(format!("Failed to parse created_at '{}': {}", created_at, e))
            })?,
    })
}

#[async_trait]
impl FinancialsRepository for SqliteRepository {
    async fn save_financials(
        &self,
        record: NewFinancialRecord,
    ) -> Result<FinancialRecord, RepositoryError> {
        let session_id = Uuid::new_v4();
        // Fixed-width timestamps keep ORDER BY created_at chronological.
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query(
            "INSERT INTO user_financials (
                session_id, gross_salary, basic_salary, hra_received, rent_paid,
                deduction_80c, deduction_80d, standard_deduction, professional_tax,
                tds, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(session_id.to_string())
        .bind(record.gross_salary.map(decimal_to_text))
        .bind(record.basic_salary.map(decimal_to_text))
        .bind(record.hra_received.map(decimal_to_text))
        .bind(record.rent_paid.map(decimal_to_text))
        .bind(record.deduction_80c.map(decimal_to_text))
        .bind(record.deduction_80d.map(decimal_to_text))
        .bind(record.standard_deduction.map(decimal_to_text))
        .bind(record.professional_tax.map(decimal_to_text))
        .bind(record.tds.map(decimal_to_text))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::info!(%session_id, "saved financials");
        self.get_financials(session_id).await
    }

    async fn get_financials(
        &self,
        session_id: Uuid,
    ) -> Result<FinancialRecord, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE session_id = ?"))
            .bind(session_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_financial_record(&row)
    }

    async fn list_financials(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FinancialRecord>, RepositoryError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map(i64::from).unwrap_or(-1);

        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_financial_record).collect()
    }

    async fn delete_financials(
        &self,
        session_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user_financials WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(%session_id, "deleted financials");
        Ok(())
    }
}
