use crate::portfolio::render::RenderTable;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OutputType {
    AdjustedTransactions,
    GainsSummary,
}

impl OutputType {
    pub fn title(&self) -> &'static str {
        match self {
            OutputType::AdjustedTransactions => "Adjusted Transactions",
            OutputType::GainsSummary => "Gains Summary",
        }
    }

    /// Used for output file names and json keys
    pub fn slug(&self) -> &'static str {
        match self {
            OutputType::AdjustedTransactions => "adjusted-transactions",
            OutputType::GainsSummary => "gains-summary",
        }
    }
}

pub type Error = String;

pub trait ReportWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error>;

    /// Some writers buffer everything until the end.
    fn finish(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}
