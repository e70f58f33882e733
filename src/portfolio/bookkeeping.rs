mod adjusted_list;
mod gain_loss;
mod wash_sale;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use self::adjusted_list::*;
pub use self::gain_loss::*;
pub use self::wash_sale::*;

/// Replacement purchases up to this many days before or after the loss sale
/// (inclusive) make it a wash sale.
pub const WASH_SALE_WINDOW_DAYS: i64 = 30;

/// A sale only counts as a loss if it is more than a cent under water.
pub const LOSS_EPSILON: Decimal = dec!(0.01);

/// Max allowed difference between the total realized gain/loss and the
/// total unadjusted net. Wash sales only move losses around.
pub const CONSERVATION_TOLERANCE: Decimal = dec!(0.01);

/// Lots held for strictly more than this many days are long term.
pub const LONG_TERM_MIN_DAYS_EXCLUSIVE: i64 = 365;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct WashSaleConfig {
    pub window_days: i64,
    pub loss_epsilon: Decimal,
    pub conservation_tolerance: Decimal,
    pub long_term_days: i64,
}

impl Default for WashSaleConfig {
    fn default() -> Self {
        Self {
            window_days: WASH_SALE_WINDOW_DAYS,
            loss_epsilon: LOSS_EPSILON,
            conservation_tolerance: CONSERVATION_TOLERANCE,
            long_term_days: LONG_TERM_MIN_DAYS_EXCLUSIVE,
        }
    }
}
