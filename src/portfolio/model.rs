pub mod adjusted_tx;
pub mod tx;
