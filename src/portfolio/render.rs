use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    portfolio::csv_common::CsvCol,
    util::{
        date::{to_pretty_string, to_standard_string},
        decimal::{is_positive, to_currency_string},
    },
};

use super::{AdjustedTx, CumulativeGains, WashSaleMatch};

#[derive(PartialEq, Eq, Clone, Debug, Default, Serialize)]
pub struct RenderTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
    pub notes: Vec<String>,
    pub errors: Vec<String>,
}

fn plus_minus_dollar(val: &Decimal, show_plus: bool, full: bool) -> String {
    let s = if full {
        val.to_string()
    } else {
        to_currency_string(val)
    };
    if show_plus && is_positive(val) {
        format!("+{s}")
    } else {
        s
    }
}

fn dollar(val: &Decimal, full: bool) -> String {
    plus_minus_dollar(val, false, full)
}

fn replacement_cell(adj: &AdjustedTx) -> String {
    [
        adj.replacement_index.map(|i| format!("-> {i}")),
        adj.replaced_loss_source.map(|i| format!("<- {i}")),
    ]
    .into_iter()
    .flatten()
    .join(", ")
}

fn year_totals_cell(gains: &CumulativeGains, full: bool) -> String {
    let total = plus_minus_dollar(&gains.realized_total, true, full);
    let years = gains.realized_year_totals_keys_sorted();
    if years.len() < 2 {
        return total;
    }
    let year_lines = years
        .iter()
        .map(|y| {
            let year_total = &gains.realized_years_totals[y];
            format!("{}: {}", y, plus_minus_dollar(year_total, true, full))
        })
        .join("\n");
    format!("{total}\n{year_lines}")
}

fn describe_match(m: &WashSaleMatch, adjs: &[AdjustedTx], full: bool) -> String {
    let source = &adjs[m.source_index];
    let replacement = &adjs[m.replacement_index];
    format!(
        "Wash sale: {} loss of {} on lot {} (sold {}) deferred to lot {} \
        (acquired {}), carrying over {} days of holding period",
        source.tx.symbol,
        dollar(&m.deferred_loss, full),
        m.source_index,
        to_pretty_string(&source.tx.date_sold),
        m.replacement_index,
        to_pretty_string(&replacement.tx.date_acquired),
        m.holding_period_days,
    )
}

/// adjs must be in index order, and matches must index into it.
pub fn render_adjusted_tx_table(
    adjs: &[AdjustedTx],
    matches: &[WashSaleMatch],
    gains: &CumulativeGains,
    render_full_values: bool,
) -> RenderTable {
    let full = render_full_values;
    let mut table = RenderTable::default();
    table.header = CsvCol::adjusted_export_order_cols()
        .iter()
        .map(|c| c.to_string())
        .collect();

    for adj in adjs {
        let tx = &adj.tx;
        table.rows.push(vec![
            tx.index.to_string(),
            tx.symbol.clone(),
            tx.lot_type.clone(),
            tx.quantity.to_string(),
            to_standard_string(&tx.date_acquired),
            to_standard_string(&adj.adjusted_date_acquired),
            to_standard_string(&tx.date_sold),
            dollar(&tx.cost_basis, full),
            dollar(&tx.proceeds, full),
            plus_minus_dollar(&tx.net(), true, full),
            dollar(&adj.adjusted_cost_basis, full),
            dollar(&adj.wash_sale_loss_deferred, full),
            plus_minus_dollar(&adj.realized_gain_loss, true, full),
            adj.term.to_string(),
            replacement_cell(adj),
        ]);

        if tx.date_acquired > tx.date_sold {
            table.errors.push(format!(
                "Lot {} ({}) was acquired on {}, after it was sold on {}",
                tx.index,
                tx.symbol,
                to_standard_string(&tx.date_acquired),
                to_standard_string(&tx.date_sold)
            ));
        }
    }

    let mut footer = vec![String::new(); table.header.len()];
    footer[0] = "Total".to_string();
    footer[9] = plus_minus_dollar(&gains.net_total, true, full);
    footer[11] = dollar(&gains.deferred_total, full);
    footer[12] = year_totals_cell(gains, full);
    table.footer = footer;

    table.notes = matches
        .iter()
        .map(|m| describe_match(m, adjs, full))
        .collect();

    table
}

pub fn render_gains_summary(
    gains: &CumulativeGains,
    render_full_values: bool,
) -> RenderTable {
    let full = render_full_values;
    let mut table = RenderTable::default();
    table.header = vec!["Gain/Loss".to_string(), "Amount".to_string()];

    let mut push = |label: String, val: &Decimal| {
        table.rows.push(vec![label, plus_minus_dollar(val, true, full)]);
    };
    push("Realized".to_string(), &gains.realized_total);
    push("If no wash sales".to_string(), &gains.net_total);
    push("Short term".to_string(), &gains.short_term_total);
    push("Long term".to_string(), &gains.long_term_total);
    for year in gains.realized_year_totals_keys_sorted() {
        push(format!("Realized in {year}"), &gains.realized_years_totals[&year]);
    }
    for (sym, total) in &gains.realized_symbol_totals {
        push(format!("Realized for {sym}"), total);
    }

    table.footer = vec![
        "Deferred".to_string(),
        dollar(&gains.deferred_total, full),
    ];

    table
}
