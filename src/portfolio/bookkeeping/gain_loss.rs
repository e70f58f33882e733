use rust_decimal::Decimal;

use crate::portfolio::{AdjustedTx, Term};

use super::WashSaleConfig;

/// The reportable gain or loss. A deferred loss is added back, so a lot
/// whose entire loss was deferred realizes nothing.
pub fn calc_realized_gain_loss(adj: &AdjustedTx) -> Decimal {
    adj.adjusted_net() + *adj.wash_sale_loss_deferred
}

/// Holding period is measured from the adjusted acquisition date, so any
/// period carried over from a wash sale counts towards it.
pub fn calc_term(adj: &AdjustedTx, cfg: &WashSaleConfig) -> Term {
    if adj.holding_period_days() > cfg.long_term_days {
        Term::Long
    } else {
        Term::Short
    }
}

/// Must run after wash sale resolution is complete.
pub fn classify_gain_losses(adjs: &mut [AdjustedTx], cfg: &WashSaleConfig) {
    for adj in adjs.iter_mut() {
        adj.realized_gain_loss = calc_realized_gain_loss(adj);
        adj.term = calc_term(adj, cfg);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::gezdec as gez;
    use crate::portfolio::testlib::{doy_date, mk_adjs, TTx};
    use crate::portfolio::Term;

    use super::super::WashSaleConfig;
    use super::{calc_realized_gain_loss, calc_term, classify_gain_losses};

    #[test]
    #[rustfmt::skip]
    fn test_realized_gain_loss() {
        let mut adjs = mk_adjs(vec![
            TTx{basis: dec!(100), proceeds: dec!(250.50), ..TTx::d()},
            TTx{basis: dec!(200), proceeds: dec!(100), ..TTx::d()},
        ]);
        assert_eq!(calc_realized_gain_loss(&adjs[0]), dec!(150.50));
        assert_eq!(calc_realized_gain_loss(&adjs[1]), dec!(-100));

        // Case: Fully deferred loss
        adjs[1].wash_sale_loss_deferred = gez!(100);
        assert_eq!(calc_realized_gain_loss(&adjs[1]), dec!(0));

        // Case: Replacement with raised basis
        adjs[0].adjusted_cost_basis = dec!(200);
        assert_eq!(calc_realized_gain_loss(&adjs[0]), dec!(50.50));
    }

    #[test]
    #[rustfmt::skip]
    fn test_term() {
        let cfg = WashSaleConfig::default();
        let mut adjs = mk_adjs(vec![
            TTx{acq_day: 0, sold_day: 10, ..TTx::d()},
            TTx{acq_day: 0, sold_day: 365, ..TTx::d()},
            TTx{acq_day: 0, sold_day: 366, ..TTx::d()},
            TTx{acq_day: 300, sold_day: 400, ..TTx::d()},
        ]);
        let terms: Vec<Term> = adjs.iter().map(|a| calc_term(a, &cfg)).collect();
        assert_eq!(terms, vec![Term::Short, Term::Short, Term::Long, Term::Short]);

        // Case: carried holding period makes it long term
        adjs[3].adjusted_date_acquired = doy_date(30);
        assert_eq!(calc_term(&adjs[3], &cfg), Term::Long);

        let cfg = WashSaleConfig{long_term_days: 5, ..WashSaleConfig::default()};
        assert_eq!(calc_term(&adjs[0], &cfg), Term::Long);
    }

    #[test]
    #[rustfmt::skip]
    fn test_classify_gain_losses() {
        let mut adjs = mk_adjs(vec![
            TTx{acq_day: 0, sold_day: 10, basis: dec!(200), proceeds: dec!(100), ..TTx::d()},
            TTx{acq_day: 0, sold_day: 400, basis: dec!(100), proceeds: dec!(150), ..TTx::d()},
        ]);
        adjs[0].wash_sale_loss_deferred = gez!(40);
        classify_gain_losses(&mut adjs, &WashSaleConfig::default());

        assert_eq!(adjs[0].realized_gain_loss, dec!(-60));
        assert_eq!(adjs[0].term, Term::Short);
        assert_eq!(adjs[1].realized_gain_loss, dec!(50));
        assert_eq!(adjs[1].term, Term::Long);
    }
}
