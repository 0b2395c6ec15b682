pub mod app;
pub mod loader;

pub use app::{RecordReport, build_registry};
pub use loader::{FinancialsCsvLoader, FinancialsLoaderError};
