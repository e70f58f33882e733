// Wash sale detection and loss deferral.
//
// Lots are processed in a single pass, in sale date (index) order. For each
// lot sold at a loss, the full set of lots is scanned (again in index order)
// for the first unused lot of the same symbol that was acquired within the
// window around the sale. The loss is then moved into that lot's cost basis,
// and the lot's acquisition date is moved back by the loss lot's holding
// period.
//
// Decisions are never revisited. A lot that has already been evaluated may
// later absorb a loss, which raises its basis, but it is not re-examined as
// a loss source. Likewise, a lot that absorbed a loss earlier in the pass is
// evaluated as a loss source with its adjusted basis when it is reached.

use time::Date;

use crate::{
    portfolio::{AdjustedTx, WashSaleMatch},
    util::{
        date::{days_between, sub_days},
        decimal::{GreaterEqualZeroDecimal, NegDecimal},
    },
};

use super::WashSaleConfig;

/// Returns the first and last acquisition dates (inclusive) which would make
/// a purchase a replacement for a sale on date_sold.
pub fn get_wash_sale_window(date_sold: Date, window_days: i64) -> (Date, Date) {
    (sub_days(date_sold, window_days), sub_days(date_sold, -window_days))
}

/// The loss on the lot at its current adjusted basis, if it is one.
pub fn get_loss(adj: &AdjustedTx, cfg: &WashSaleConfig) -> Option<NegDecimal> {
    let adjusted_net = adj.adjusted_net();
    if adjusted_net < -cfg.loss_epsilon {
        NegDecimal::try_from(adjusted_net).ok()
    } else {
        None
    }
}

pub fn is_loss(adj: &AdjustedTx, cfg: &WashSaleConfig) -> bool {
    get_loss(adj, cfg).is_some()
}

fn is_replacement_candidate(
    source: &AdjustedTx,
    candidate: &AdjustedTx,
    cfg: &WashSaleConfig,
) -> bool {
    if candidate.index() == source.index()
        || candidate.used_as_replacement
        || candidate.tx.symbol != source.tx.symbol
    {
        return false;
    }
    // Uses the original acquisition date of the candidate, not the adjusted
    // one.
    let (first, last) = get_wash_sale_window(source.tx.date_sold, cfg.window_days);
    first <= candidate.tx.date_acquired && candidate.tx.date_acquired <= last
}

/// Finds the replacement lot for the loss at source_idx. This is the first
/// eligible lot in index order, which is not necessarily the one acquired
/// nearest to the sale.
pub fn find_replacement_idx(
    source_idx: usize,
    adjs: &[AdjustedTx],
    cfg: &WashSaleConfig,
) -> Option<usize> {
    let source = &adjs[source_idx];
    adjs.iter()
        .position(|candidate| is_replacement_candidate(source, candidate, cfg))
}

/// Defers the loss of the lot at source_idx into the lot at replacement_idx.
/// Only called by resolve_wash_sales, after find_replacement_idx has
/// chosen a replacement other than the source.
///
/// The deferred amount is the full loss at the source's current adjusted
/// basis. The holding period carried over is also measured from the source's
/// adjusted acquisition date, so chained deferrals accumulate.
fn apply_wash_sale(
    source_idx: usize,
    replacement_idx: usize,
    adjs: &mut [AdjustedTx],
) -> WashSaleMatch {
    assert_ne!(source_idx, replacement_idx,
               "apply_wash_sale: a lot cannot be its own replacement");

    let source = &mut adjs[source_idx];
    let holding_period_days = source.holding_period_days();
    let loss_to_defer = GreaterEqualZeroDecimal::abs_of(source.adjusted_net());
    source.wash_sale_loss_deferred = loss_to_defer;
    source.replacement_index = Some(replacement_idx);

    let replacement = &mut adjs[replacement_idx];
    replacement.adjusted_cost_basis += *loss_to_defer;
    replacement.adjusted_date_acquired =
        sub_days(replacement.adjusted_date_acquired, holding_period_days);
    replacement.used_as_replacement = true;
    replacement.replaced_loss_source = Some(source_idx);

    WashSaleMatch {
        source_index: source_idx,
        replacement_index: replacement_idx,
        deferred_loss: loss_to_defer,
        holding_period_days,
    }
}

/// Runs wash sale resolution over all lots, which must be in index order
/// (adjs[i].index() == i). Returns the matches in the order they were made.
pub fn resolve_wash_sales(
    adjs: &mut [AdjustedTx],
    cfg: &WashSaleConfig,
) -> Vec<WashSaleMatch> {
    let mut matches = Vec::new();

    for source_idx in 0..adjs.len() {
        let loss = match get_loss(&adjs[source_idx], cfg) {
            Some(l) => l,
            None => continue,
        };

        let replacement_idx = match find_replacement_idx(source_idx, adjs, cfg) {
            Some(i) => i,
            None => {
                tracing::trace!(
                    "resolve_wash_sales: loss of {} on lot {} ({} sold {}) has no replacement",
                    loss, source_idx, adjs[source_idx].tx.symbol,
                    adjs[source_idx].tx.date_sold);
                continue;
            }
        };

        let m = apply_wash_sale(source_idx, replacement_idx, adjs);
        tracing::debug!(
            "resolve_wash_sales: {} sold {}, replacement lot {} acquired {} \
            ({} days apart). Deferred {}, carried {} days held",
            adjs[source_idx].tx.symbol,
            adjs[source_idx].tx.date_sold,
            replacement_idx,
            adjs[replacement_idx].tx.date_acquired,
            days_between(adjs[source_idx].tx.date_sold,
                         adjs[replacement_idx].tx.date_acquired).abs(),
            m.deferred_loss,
            m.holding_period_days);
        matches.push(m);
    }

    matches
}
