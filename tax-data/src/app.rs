use serde::Serialize;
use tax_core::db::RepositoryRegistry;
use tax_core::{FinancialRecord, Regime, RegimeComparator, RegimeComparison};
use tax_db_sqlite::SqliteRepositoryFactory;

/// Registry with every storage backend this build supports.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// A stored record alongside a fresh regime comparison of its amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordReport {
    #[serde(flatten)]
    pub record: FinancialRecord,
    pub comparison: RegimeComparison,
    pub recommended: Regime,
}

impl RecordReport {
    pub fn new(
        record: FinancialRecord,
        comparator: &RegimeComparator,
    ) -> Self {
        let comparison = comparator.compare(&record.inputs());
        Self {
            recommended: comparison.recommended(),
            comparison,
            record,
        }
    }
}
