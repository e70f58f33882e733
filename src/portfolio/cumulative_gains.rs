use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use super::{AdjustedTx, Symbol, Term};

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct CumulativeGains {
    // Sum of realized gains/losses. This is what gets reported.
    pub realized_total: Decimal,
    // What the total would have been with no wash sales at all.
    pub net_total: Decimal,
    pub deferred_total: Decimal,
    pub short_term_total: Decimal,
    pub long_term_total: Decimal,
    // Keyed by year of sale
    pub realized_years_totals: HashMap<i32, Decimal>,
    pub realized_symbol_totals: BTreeMap<Symbol, Decimal>,
}

impl CumulativeGains {
    pub fn realized_year_totals_keys_sorted(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.realized_years_totals.keys().copied().collect();
        years.sort();
        years
    }

    /// Should always be (near) zero, since wash sales only move losses
    /// between lots.
    pub fn conservation_delta(&self) -> Decimal {
        self.net_total - self.realized_total
    }
}

pub fn calc_cumulative_gains(adjs: &[AdjustedTx]) -> CumulativeGains {
    let mut gains = CumulativeGains::default();

    for adj in adjs {
        let realized = adj.realized_gain_loss;
        gains.realized_total += realized;
        gains.net_total += adj.net();
        gains.deferred_total += *adj.wash_sale_loss_deferred;
        match adj.term {
            Term::Short => gains.short_term_total += realized,
            Term::Long => gains.long_term_total += realized,
        }

        *gains
            .realized_years_totals
            .entry(adj.tx.date_sold.year())
            .or_insert(Decimal::ZERO) += realized;
        *gains
            .realized_symbol_totals
            .entry(adj.tx.symbol.clone())
            .or_insert(Decimal::ZERO) += realized;
    }

    gains
}
