pub mod calculations;
pub mod db;
pub mod extraction;
pub mod models;

pub use calculations::{RegimeComparator, RegimeConfig};
pub use db::repository::{FinancialsRepository, RepositoryError};
pub use extraction::{FieldExtractor, JsonFieldExtractor, RegexFieldExtractor, extract_with_fallback};
pub use models::*;
