use std::fmt::Display;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

pub type Symbol = String;

/// One sold lot, as reported on a brokerage statement.
/// Lots are indivisible; quantity is informational only.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Tx {
    // Dense, zero-based position in sale-date order. Assigned by
    // normalization, and used as the scan order for wash sale matching.
    pub index: usize,
    pub symbol: Symbol,
    // eg. RSU, ESPP. Carried through only.
    pub lot_type: String,
    pub quantity: Decimal,
    pub date_acquired: Date,
    pub date_sold: Date,
    pub cost_basis: Decimal,
    pub proceeds: Decimal,

    // The absolute order in which the Tx was read from file.
    // Used as a tiebreak in sorting.
    pub read_index: u32,
}

impl Tx {
    pub fn net(&self) -> Decimal {
        self.proceeds - self.cost_basis
    }
}

impl PartialOrd for Tx {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tx {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.date_sold
            .cmp(&other.date_sold)
            .then_with(|| self.read_index.cmp(&other.read_index))
    }
}

/// Holding period classification.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum Term {
    Short,
    Long,
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Term::Short => "Short",
            Term::Long => "Long",
        };
        write!(f, "{}", s)
    }
}
