use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::Date;

use super::{AdjustedTx, Tx};

pub const DEFAULT_SYMBOL: &str = "FOO";

pub fn default_sym() -> String {
    DEFAULT_SYMBOL.to_string()
}

/// Day-of-year date in 2024
pub fn doy_date(day: i64) -> Date {
    crate::util::date::pub_testlib::doy_date(2024, day)
}

// The names here are abbreviated to make test writing as concise and
// convenient as possible.
#[derive(Clone, Debug)]
pub struct TTx {
    pub idx: usize,
    pub sym: &'static str,
    pub lot_type: &'static str,
    pub qty: Decimal,
    pub acq_day: i64,
    pub sold_day: i64,
    pub basis: Decimal,
    pub proceeds: Decimal,
    pub read_index: u32,
}

impl TTx {
    pub fn x(&self) -> Tx {
        Tx {
            index: self.idx,
            symbol: self.sym.to_string(),
            lot_type: self.lot_type.to_string(),
            quantity: self.qty,
            date_acquired: doy_date(self.acq_day),
            date_sold: doy_date(self.sold_day),
            cost_basis: self.basis,
            proceeds: self.proceeds,
            read_index: self.read_index,
        }
    }

    pub fn d() -> Self {
        Self::default()
    }
}

impl Default for TTx {
    fn default() -> Self {
        Self {
            idx: 0,
            sym: DEFAULT_SYMBOL,
            lot_type: "RSU",
            qty: dec!(1),
            acq_day: 0,
            sold_day: 0,
            basis: dec!(0),
            proceeds: dec!(0),
            read_index: 0,
        }
    }
}

/// Builds Txs with index and read_index assigned by position.
/// The TTxs must already be in sale date order.
pub fn mk_txs(ttxs: Vec<TTx>) -> Vec<Tx> {
    ttxs.into_iter()
        .enumerate()
        .map(|(i, t)| TTx { idx: i, read_index: i as u32, ..t }.x())
        .collect()
}

pub fn mk_adjs(ttxs: Vec<TTx>) -> Vec<AdjustedTx> {
    mk_txs(ttxs).into_iter().map(AdjustedTx::new).collect()
}
