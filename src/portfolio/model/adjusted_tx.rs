use rust_decimal::Decimal;
use time::Date;

use crate::util::{date::days_between, decimal::GreaterEqualZeroDecimal};

use super::tx::{Term, Tx};

/// Working and output state for a single lot. There is exactly one of these
/// per Tx, at the same index. The resolver mutates the adjustment fields in
/// place; the classifier then fills in realized_gain_loss and term.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct AdjustedTx {
    pub tx: Tx,

    // Only ever increases, when this lot absorbs a deferred loss.
    pub adjusted_cost_basis: Decimal,
    // Moved back by the holding period of the lot whose loss was absorbed.
    pub adjusted_date_acquired: Date,
    // Set once, when this lot's loss is deferred into a replacement.
    pub wash_sale_loss_deferred: GreaterEqualZeroDecimal,
    // A lot may only absorb one loss.
    pub used_as_replacement: bool,

    // Index of the lot which absorbed this lot's loss.
    pub replacement_index: Option<usize>,
    // Index of the lot whose loss this lot absorbed.
    pub replaced_loss_source: Option<usize>,

    // Populated by classification.
    pub realized_gain_loss: Decimal,
    pub term: Term,
}

impl AdjustedTx {
    pub fn new(tx: Tx) -> AdjustedTx {
        AdjustedTx {
            adjusted_cost_basis: tx.cost_basis,
            adjusted_date_acquired: tx.date_acquired,
            wash_sale_loss_deferred: GreaterEqualZeroDecimal::zero(),
            used_as_replacement: false,
            replacement_index: None,
            replaced_loss_source: None,
            realized_gain_loss: tx.net(),
            term: Term::Short,
            tx,
        }
    }

    pub fn index(&self) -> usize {
        self.tx.index
    }

    pub fn net(&self) -> Decimal {
        self.tx.net()
    }

    /// Proceeds less the current (possibly adjusted) cost basis.
    pub fn adjusted_net(&self) -> Decimal {
        self.tx.proceeds - self.adjusted_cost_basis
    }

    /// Days held, counting any holding period carried over from a
    /// wash sale.
    pub fn holding_period_days(&self) -> i64 {
        days_between(self.tx.date_sold, self.adjusted_date_acquired)
    }
}

/// A committed wash sale. Recorded in the order matches were made.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct WashSaleMatch {
    pub source_index: usize,
    pub replacement_index: usize,
    pub deferred_loss: GreaterEqualZeroDecimal,
    // Holding period of the source lot, carried into the replacement.
    pub holding_period_days: i64,
}
