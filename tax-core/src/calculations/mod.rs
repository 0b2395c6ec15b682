//! Tax computation engine for the two income-tax regimes.
//!
//! Every function here is pure and infallible. The pieces compose top-down
//! into [`RegimeComparator`].

pub mod brackets;
pub mod cess;
pub mod common;
pub mod comparator;
pub mod deductions;
pub mod hra;
pub mod normalize;

pub use brackets::bracket_tax;
pub use cess::{CESS_RATE, with_cess};
pub use comparator::{RegimeComparator, RegimeConfig, RegimeRules, STANDARD_DEDUCTION};
pub use deductions::{DeductionPolicy, total_deductions};
pub use hra::hra_exemption;
pub use normalize::normalize;
