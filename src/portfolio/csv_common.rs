
/// Column names of the transaction tables, both the input lots and the
/// adjusted output. Input headers are matched case-insensitively.
pub struct CsvCol();
impl CsvCol {
    pub const SYMBOL: &'static str = "Symbol";
    pub const TYPE: &'static str = "Type";
    pub const QUANTITY: &'static str = "Quantity";
    pub const DATE_ACQUIRED: &'static str = "Date_Acquired";
    pub const DATE_SOLD: &'static str = "Date_Sold";
    pub const COST_BASIS: &'static str = "Cost_Basis";
    pub const PROCEEDS: &'static str = "Proceeds";

    // Output only
    pub const INDEX: &'static str = "Index";
    pub const NET: &'static str = "Net";
    pub const ADJUSTED_DATE_ACQUIRED: &'static str = "Adjusted_Date_Acquired";
    pub const ADJUSTED_COST_BASIS: &'static str = "Adjusted_Cost_Basis";
    pub const WASH_SALE_LOSS_DEFERRED: &'static str = "Wash_Sale_Loss_Deferred";
    pub const REALIZED_GAIN_LOSS: &'static str = "Realized_Gain_Loss";
    pub const TERM: &'static str = "Term";
    pub const REPLACEMENT: &'static str = "Replacement";

    pub fn input_cols() -> [&'static str; 7] {
        [
            CsvCol::SYMBOL,
            CsvCol::TYPE,
            CsvCol::QUANTITY,
            CsvCol::DATE_ACQUIRED,
            CsvCol::DATE_SOLD,
            CsvCol::COST_BASIS,
            CsvCol::PROCEEDS,
        ]
    }

    /// Looks up the canonical input column for a header, ignoring case and
    /// surrounding whitespace.
    pub fn find_input_col(header: &str) -> Option<&'static str> {
        let san_header = header.trim();
        CsvCol::input_cols()
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(san_header))
    }

    pub fn adjusted_export_order_cols() -> [&'static str; 15] {
        [
            CsvCol::INDEX,
            CsvCol::SYMBOL,
            CsvCol::TYPE,
            CsvCol::QUANTITY,
            CsvCol::DATE_ACQUIRED,
            CsvCol::ADJUSTED_DATE_ACQUIRED,
            CsvCol::DATE_SOLD,
            CsvCol::COST_BASIS,
            CsvCol::PROCEEDS,
            CsvCol::NET,
            CsvCol::ADJUSTED_COST_BASIS,
            CsvCol::WASH_SALE_LOSS_DEFERRED,
            CsvCol::REALIZED_GAIN_LOSS,
            CsvCol::TERM,
            CsvCol::REPLACEMENT,
        ]
    }
}
