use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contiguous income band taxed at a single marginal rate.
///
/// The band runs from the previous bracket's upper bound (or zero) up to and
/// including `upper_bound`. `None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

impl TaxBracket {
    pub const fn bounded(
        upper_bound: Decimal,
        marginal_rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            marginal_rate,
        }
    }

    pub const fn unbounded(marginal_rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            marginal_rate,
        }
    }
}

/// Errors raised when a bracket list does not partition `[0, ∞)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("bracket {index}: upper bound {bound} must exceed the previous bound {previous}")]
    NotAscending {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("the last bracket must be unbounded")]
    BoundedFinalBracket,

    #[error("bracket {index}: rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// Ordered brackets with strictly ascending bounds and an unbounded final band.
///
/// Construction through [`BracketTable::new`] (or deserialization) checks the
/// partition invariants, so every table the engine sees covers `[0, ∞)`
/// without gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let last = brackets.len().checked_sub(1).ok_or(BracketTableError::Empty)?;
        let mut previous = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.marginal_rate < Decimal::ZERO || bracket.marginal_rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: bracket.marginal_rate,
                });
            }

            match bracket.upper_bound {
                Some(bound) if bound <= previous => {
                    return Err(BracketTableError::NotAscending {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(_) if index == last => return Err(BracketTableError::BoundedFinalBracket),
                Some(bound) => previous = bound,
                None if index != last => {
                    return Err(BracketTableError::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Slabs of the deduction-heavy ("old") regime.
    pub fn heavy_regime() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(Decimal::new(250_000, 0), Decimal::ZERO),
                TaxBracket::bounded(Decimal::new(500_000, 0), Decimal::new(5, 2)),
                TaxBracket::bounded(Decimal::new(1_000_000, 0), Decimal::new(20, 2)),
                TaxBracket::unbounded(Decimal::new(30, 2)),
            ],
        }
    }

    /// Slabs of the deduction-light ("new") regime.
    pub fn light_regime() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(Decimal::new(300_000, 0), Decimal::ZERO),
                TaxBracket::bounded(Decimal::new(600_000, 0), Decimal::new(5, 2)),
                TaxBracket::bounded(Decimal::new(900_000, 0), Decimal::new(10, 2)),
                TaxBracket::bounded(Decimal::new(1_200_000, 0), Decimal::new(15, 2)),
                TaxBracket::bounded(Decimal::new(1_500_000, 0), Decimal::new(20, 2)),
                TaxBracket::unbounded(Decimal::new(30, 2)),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = BracketTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}
