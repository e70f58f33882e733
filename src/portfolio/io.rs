pub mod tx_loader;
pub mod tx_table;
