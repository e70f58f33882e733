use crate::{
    portfolio::Tx,
    util::rw::{DescribedReader, WriteHandle},
};

use super::tx_table::{parse_tx_table, TxTableParseOptions};

type Error = String;

/// Sorts lots by sale date (ties keep read order) and assigns each its
/// index in that order.
pub fn normalize_txs(mut txs: Vec<Tx>) -> Vec<Tx> {
    // Stable, and Tx ordering already falls back to read_index.
    txs.sort();
    for (i, tx) in txs.iter_mut().enumerate() {
        tx.index = i;
    }
    txs
}

/// Reads all tables, in order, and returns the combined normalized lots.
/// read_index is global across all tables.
pub fn load_tx_tables(
    readers: &[DescribedReader],
    parse_options: &TxTableParseOptions,
    err_stream: &mut WriteHandle,
) -> Result<Vec<Tx>, Error> {
    let mut all_txs = Vec::<Tx>::new();
    for desc_reader in readers {
        let txs = parse_tx_table(
            desc_reader,
            all_txs.len() as u32,
            parse_options,
            err_stream,
        )?;
        all_txs.extend(txs);
    }
    Ok(normalize_txs(all_txs))
}
