pub mod bookkeeping;
pub mod csv_common;
pub mod cumulative_gains;
pub mod io;
pub mod model;
pub mod render;

#[cfg(test)]
pub mod testlib;

pub use self::cumulative_gains::*;
pub use self::model::adjusted_tx::*;
pub use self::model::tx::*;
