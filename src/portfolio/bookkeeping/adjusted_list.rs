use std::fmt::Display;

use rust_decimal::Decimal;

use crate::portfolio::{AdjustedTx, Tx, WashSaleMatch};

use super::{classify_gain_losses, resolve_wash_sales, WashSaleConfig};

type Error = String;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum AdjustedListError {
    /// The input was not normalized (see io::normalize_txs).
    InvariantViolation(Error),
    /// Wash sales should only ever move losses between lots. If this fails,
    /// there is a bug in the resolver.
    ConservationViolation {
        net_total: Decimal,
        realized_total: Decimal,
    },
}

impl Display for AdjustedListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustedListError::InvariantViolation(msg) => write!(f, "{}", msg),
            AdjustedListError::ConservationViolation {
                net_total,
                realized_total,
            } => write!(
                f,
                "Total realized gain/loss ({}) does not match total net \
                gain/loss ({})",
                realized_total, net_total
            ),
        }
    }
}

impl std::error::Error for AdjustedListError {}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct AdjustedListResult {
    // In index order
    pub adjusted: Vec<AdjustedTx>,
    pub matches: Vec<WashSaleMatch>,
}

impl AdjustedListResult {
    pub fn net_total(&self) -> Decimal {
        self.adjusted.iter().map(|a| a.net()).sum()
    }

    pub fn realized_total(&self) -> Decimal {
        self.adjusted.iter().map(|a| a.realized_gain_loss).sum()
    }
}

fn check_normalized(txs: &[Tx]) -> Result<(), Error> {
    for (i, tx) in txs.iter().enumerate() {
        let err_prefix = || {
            format!(
                "In sale of {} {} on {} (read index {})",
                tx.quantity, tx.symbol, tx.date_sold, tx.read_index
            )
        };

        if tx.index != i {
            return Err(format!(
                "{} expected index {} but found {}",
                err_prefix(),
                i,
                tx.index
            ));
        }
        if i > 0 && tx.date_sold < txs[i - 1].date_sold {
            return Err(format!(
                "{} sale date is before that of the previous transaction ({})",
                err_prefix(),
                txs[i - 1].date_sold
            ));
        }
    }
    Ok(())
}

fn check_conservation(
    adjs: &[AdjustedTx],
    cfg: &WashSaleConfig,
) -> Result<(), AdjustedListError> {
    let net_total: Decimal = adjs.iter().map(|a| a.net()).sum();
    let realized_total: Decimal = adjs.iter().map(|a| a.realized_gain_loss).sum();
    if (net_total - realized_total).abs() > cfg.conservation_tolerance {
        tracing::error!(
            "check_conservation: realized {} != net {}",
            realized_total,
            net_total
        );
        return Err(AdjustedListError::ConservationViolation {
            net_total,
            realized_total,
        });
    }
    Ok(())
}

/// Resolves wash sales and classifies gains for a normalized set of lots.
/// The input must be sorted by sale date, with indices 0..n-1 in order.
pub fn txs_to_adjusted_list(
    txs: &[Tx],
    cfg: &WashSaleConfig,
) -> Result<AdjustedListResult, AdjustedListError> {
    check_normalized(txs).map_err(AdjustedListError::InvariantViolation)?;

    let mut adjusted: Vec<AdjustedTx> =
        txs.iter().cloned().map(AdjustedTx::new).collect();

    let matches = resolve_wash_sales(&mut adjusted, cfg);
    classify_gain_losses(&mut adjusted, cfg);
    adjusted.sort_by_key(|a| a.index());

    check_conservation(&adjusted, cfg)?;

    tracing::debug!(
        "txs_to_adjusted_list: {} lots, {} wash sales",
        adjusted.len(),
        matches.len()
    );
    Ok(AdjustedListResult { adjusted, matches })
}

// MARK: tests
