use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::portfolio::csv_common::CsvCol;
use crate::portfolio::Tx;
use crate::util::date::{parse_date, DynDateFormat};
use crate::util::decimal::parse_currency;
use crate::util::rw::{DescribedReader, WriteHandle};
use crate::write_errln;

type Error = String;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TxTableFormat {
    /// Columns separated by any run of spaces or tabs, as pasted from a
    /// brokerage statement. Values may not contain whitespace.
    Wsv,
    Csv,
}

impl TxTableFormat {
    /// Anything not named *.csv is taken to be whitespace-separated.
    pub fn infer_from_desc(desc: &str) -> TxTableFormat {
        if desc.to_lowercase().ends_with(".csv") {
            TxTableFormat::Csv
        } else {
            TxTableFormat::Wsv
        }
    }
}

#[derive(Debug)]
pub struct TxTableParseOptions {
    pub date_format: Option<DynDateFormat>,
    // None to infer from the reader description.
    pub format: Option<TxTableFormat>,
}

impl Default for TxTableParseOptions {
    fn default() -> Self {
        Self {
            date_format: None,
            format: None,
        }
    }
}

// A data row, along with its 1-based row number in the file
// (header included).
struct TableRow {
    row_num: usize,
    values: Vec<String>,
}

struct RawTable {
    header: Vec<String>,
    rows: Vec<TableRow>,
}

fn read_wsv_table(desc_reader: &DescribedReader) -> Result<RawTable, Error> {
    let text = desc_reader.read_to_string()?;

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let header = match lines.next() {
        Some((_, line)) => line.split_whitespace().map(String::from).collect(),
        None => Vec::new(),
    };

    let rows = lines
        .map(|(row_num, line)| TableRow {
            row_num,
            values: line.split_whitespace().map(String::from).collect(),
        })
        .collect();

    Ok(RawTable { header, rows })
}

fn read_csv_table(desc_reader: &DescribedReader) -> Result<RawTable, Error> {
    let csv_desc = desc_reader.desc();
    let reader = desc_reader
        .reader()
        .map_err(|e| format!("Failed to read {csv_desc}: {e}"))?;

    // Field counts are checked per row below, for a consistent error.
    let mut csv_r = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = csv_r
        .headers()
        .map_err(|e| format!("Error in csv headers of {csv_desc}: {e}"))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for (i, record_res) in csv_r.records().enumerate() {
        // Start at 1 for the user, and include header.
        let row_num = i + 2;
        let record = record_res.map_err(|e| {
            format!("Error reading csv record in {csv_desc} at row {row_num}: {e}")
        })?;
        rows.push(TableRow {
            row_num,
            values: record.iter().map(String::from).collect(),
        });
    }

    Ok(RawTable { header, rows })
}

fn tx_from_values(
    mut values: HashMap<&'static str, String>,
    read_index: u32,
    parse_options: &TxTableParseOptions,
) -> Result<Tx, Error> {
    // All columns are known to be present by this point.
    let mut take = |col: &'static str| values.remove(col).unwrap_or_default();

    let parse_tx_date = |value: String, col: &str| {
        parse_date(&value, &parse_options.date_format)
            .map_err(|e| format!("Failed to parse {} \"{}\": {}", col, value, e))
    };
    let parse_money = |value: String, col: &str| {
        parse_currency(&value).map_err(|e| format!("Failed to parse {}: {}", col, e))
    };

    let symbol = take(CsvCol::SYMBOL);
    if symbol.is_empty() {
        return Err(format!("{} is empty", CsvCol::SYMBOL));
    }
    let lot_type = take(CsvCol::TYPE);
    let quantity_str = take(CsvCol::QUANTITY);
    let quantity = Decimal::from_str(&quantity_str).map_err(|e| {
        format!(
            "Failed to parse number for {} ('{}'): {}",
            CsvCol::QUANTITY,
            quantity_str,
            e
        )
    })?;

    Ok(Tx {
        // Assigned by normalize_txs
        index: 0,
        symbol,
        lot_type,
        quantity,
        date_acquired: parse_tx_date(take(CsvCol::DATE_ACQUIRED), CsvCol::DATE_ACQUIRED)?,
        date_sold: parse_tx_date(take(CsvCol::DATE_SOLD), CsvCol::DATE_SOLD)?,
        cost_basis: parse_money(take(CsvCol::COST_BASIS), CsvCol::COST_BASIS)?,
        proceeds: parse_money(take(CsvCol::PROCEEDS), CsvCol::PROCEEDS)?,
        read_index,
    })
}

/// Parses a table of sold lots. The returned Txs are in file order, and do
/// not yet have an index (see normalize_txs).
pub fn parse_tx_table(
    desc_reader: &DescribedReader,
    initial_global_read_index: u32,
    parse_options: &TxTableParseOptions,
    err_stream: &mut WriteHandle,
) -> Result<Vec<Tx>, Error> {
    let table_desc = desc_reader.desc();
    let format = parse_options
        .format
        .unwrap_or_else(|| TxTableFormat::infer_from_desc(table_desc));

    let table = match format {
        TxTableFormat::Wsv => read_wsv_table(desc_reader)?,
        TxTableFormat::Csv => read_csv_table(desc_reader)?,
    };

    if table.header.is_empty() {
        return Err(format!("{table_desc} has no header"));
    }

    let mut col_index_to_name: HashMap<usize, &'static str> = HashMap::new();
    for (i, col) in table.header.iter().enumerate() {
        match CsvCol::find_input_col(col) {
            Some(static_str) => {
                if col_index_to_name.values().any(|c| *c == static_str) {
                    return Err(format!(
                        "{table_desc} contains more than one {static_str} column"
                    ));
                }
                col_index_to_name.insert(i, static_str);
            }
            None => {
                write_errln!(
                    err_stream,
                    "Warning: Unrecognized column in {table_desc}: {}",
                    col.trim()
                );
            }
        }
    }

    for col in CsvCol::input_cols() {
        if !col_index_to_name.values().any(|c| *c == col) {
            return Err(format!("{table_desc} is missing required column {col}"));
        }
    }

    let mut txs = Vec::<Tx>::with_capacity(table.rows.len());
    let mut global_row_index = initial_global_read_index;

    for row in table.rows {
        let row_num = row.row_num;
        if row.values.len() != table.header.len() {
            return Err(format!(
                "Error on row {row_num} of {table_desc}: expected {} fields but found {}",
                table.header.len(),
                row.values.len()
            ));
        }

        let mut tx_values = HashMap::<&'static str, String>::new();
        for (i, col_val) in row.values.into_iter().enumerate() {
            // Values of unrecognized columns are dropped.
            if let Some(col_name) = col_index_to_name.get(&i) {
                tx_values.insert(*col_name, col_val.trim().to_string());
            }
        }

        let tx = tx_from_values(tx_values, global_row_index, parse_options)
            .map_err(|e| format!("Error on row {row_num} of {table_desc}: {e}"))?;
        txs.push(tx);

        global_row_index += 1;
    }

    tracing::debug!("parse_tx_table: read {} lots from {}", txs.len(), table_desc);
    Ok(txs)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::portfolio::Tx;
    use crate::testlib::{assert_re, assert_vecr_eq};
    use crate::util::date::{parse_dyn_date_format, parse_iso_date};
    use crate::util::rw::{DescribedReader, WriteHandle};

    use super::{parse_tx_table, Error, TxTableFormat, TxTableParseOptions};

    const WSV_HEADER: &str =
        "Symbol\tType\tQuantity\tDate_Acquired\tDate_Sold\tCost_Basis\tProceeds";

    fn reader(desc: &str, text: &str) -> DescribedReader {
        DescribedReader::from_string(desc.to_string(), text.to_string())
    }

    fn parse_ok(desc: &str, text: &str) -> Vec<Tx> {
        parse_tx_table(
            &reader(desc, text),
            0,
            &TxTableParseOptions::default(),
            &mut WriteHandle::empty_write_handle(),
        )
        .unwrap()
    }

    fn parse_err(desc: &str, text: &str) -> Error {
        parse_tx_table(
            &reader(desc, text),
            0,
            &TxTableParseOptions::default(),
            &mut WriteHandle::empty_write_handle(),
        )
        .unwrap_err()
    }

    fn date(s: &str) -> time::Date {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_infer_format() {
        assert_eq!(TxTableFormat::infer_from_desc("a/b.csv"), TxTableFormat::Csv);
        assert_eq!(TxTableFormat::infer_from_desc("B.CSV"), TxTableFormat::Csv);
        assert_eq!(TxTableFormat::infer_from_desc("b.txt"), TxTableFormat::Wsv);
        assert_eq!(TxTableFormat::infer_from_desc("<stdin>"), TxTableFormat::Wsv);
    }

    #[test]
    fn test_parse_wsv_basic() {
        let text = format!(
            "\n{WSV_HEADER}\n\
            EXAMPLE\tRSU     42          01/01/2025\t    01/02/2025  $100        $200\n\
            \n  \
            FOO ESPP 1.5 12/30/2024 03/04/2025 $1,234.56 $1,000\n"
        );
        let txs = parse_ok("foo.txt", &text);

        #[rustfmt::skip]
        let exp = vec![
            Tx{index: 0, symbol: "EXAMPLE".to_string(), lot_type: "RSU".to_string(),
               quantity: dec!(42),
               date_acquired: date("2025-01-01"), date_sold: date("2025-01-02"),
               cost_basis: dec!(100), proceeds: dec!(200), read_index: 0},
            Tx{index: 0, symbol: "FOO".to_string(), lot_type: "ESPP".to_string(),
               quantity: dec!(1.5),
               date_acquired: date("2024-12-30"), date_sold: date("2025-03-04"),
               cost_basis: dec!(1234.56), proceeds: dec!(1000), read_index: 1},
        ];
        assert_vecr_eq(&txs, &exp);
        assert_eq!(txs[0].net(), dec!(100));
    }

    #[test]
    fn test_parse_csv_basic() {
        let text = "proceeds,SYMBOL,type,quantity,date_acquired,date_sold,cost_basis\n\
                    \"$2,000.10\", BAR ,RSU,3,1/5/2024,02/01/2024,\"$1,500\"\n";
        let txs = parse_tx_table(
            &reader("foo.csv", text),
            7,
            &TxTableParseOptions::default(),
            &mut WriteHandle::empty_write_handle(),
        )
        .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].symbol, "BAR");
        assert_eq!(txs[0].date_acquired, date("2024-01-05"));
        assert_eq!(txs[0].date_sold, date("2024-02-01"));
        assert_eq!(txs[0].cost_basis, dec!(1500));
        assert_eq!(txs[0].proceeds, dec!(2000.10));
        assert_eq!(txs[0].read_index, 7);
    }

    #[test]
    fn test_explicit_format_and_date_format() {
        let text = format!("{WSV_HEADER}\nFOO RSU 1 2024-01-05 2024-02-01 $1 $2\n");
        let opts = TxTableParseOptions {
            date_format: Some(parse_dyn_date_format("[year]-[month]-[day]").unwrap()),
            format: Some(TxTableFormat::Wsv),
        };
        let txs = parse_tx_table(
            &reader("foo.csv", &text),
            0,
            &opts,
            &mut WriteHandle::empty_write_handle(),
        )
        .unwrap();
        assert_eq!(txs[0].date_sold, date("2024-02-01"));
    }

    #[test]
    fn test_unknown_columns() {
        let text = format!("{WSV_HEADER} Notes\nFOO RSU 1 01/05/2024 02/01/2024 $1 $2 hi\n");
        let (mut handle, buff) = WriteHandle::string_buff_write_handle();
        let txs = parse_tx_table(
            &reader("foo.txt", &text),
            0,
            &TxTableParseOptions::default(),
            &mut handle,
        )
        .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(
            buff.borrow().as_str(),
            "Warning: Unrecognized column in foo.txt: Notes\n"
        );
    }

    #[test]
    fn test_header_only() {
        assert_eq!(parse_ok("foo.txt", WSV_HEADER), vec![]);
    }

    #[test]
    fn test_parse_fatal_errors() {
        assert_eq!(parse_err("foo.txt", ""), "foo.txt has no header");

        let err = parse_err(
            "foo.txt",
            "Symbol Type Quantity Date_Acquired Cost_Basis Proceeds\n",
        );
        assert_eq!(err, "foo.txt is missing required column Date_Sold");

        let err = parse_err("foo.txt", &format!("{WSV_HEADER} symbol\n"));
        assert_eq!(err, "foo.txt contains more than one Symbol column");

        // Wrong field count. Blank lines still count towards the row.
        let err = parse_err(
            "foo.txt",
            &format!("{WSV_HEADER}\n\nFOO RSU 1 01/05/2024 02/01/2024 $1\n"),
        );
        assert_eq!(err, "Error on row 3 of foo.txt: expected 7 fields but found 6");

        let err = parse_err(
            "foo.csv",
            "Symbol,Type,Quantity,Date_Acquired,Date_Sold,Cost_Basis,Proceeds\n\
             FOO,RSU,1,01/05/2024,02/01/2024,$1,$2,$3\n",
        );
        assert_eq!(err, "Error on row 2 of foo.csv: expected 7 fields but found 8");

        let bad_row = |row: &str| -> Error {
            parse_err("foo.txt", &format!("{WSV_HEADER}\n{row}\n"))
        };

        let err = bad_row("FOO RSU 1 13/05/2024 02/01/2024 $1 $2");
        assert_re(
            r#"^Error on row 2 of foo.txt: Failed to parse Date_Acquired "13/05/2024": "#,
            &err,
        );
        let err = bad_row("FOO RSU 1 01/05/2024 2024-02-01 $1 $2");
        assert_re(
            r#"^Error on row 2 of foo.txt: Failed to parse Date_Sold "2024-02-01": "#,
            &err,
        );
        let err = bad_row("FOO RSU x 01/05/2024 02/01/2024 $1 $2");
        assert_re(
            r"^Error on row 2 of foo.txt: Failed to parse number for Quantity \('x'\): ",
            &err,
        );
        let err = bad_row("FOO RSU 1 01/05/2024 02/01/2024 $1 USD2");
        assert_re(
            r"^Error on row 2 of foo.txt: Failed to parse Proceeds: Invalid currency value 'USD2'",
            &err,
        );

        let err = parse_err(
            "foo.csv",
            "Symbol,Type,Quantity,Date_Acquired,Date_Sold,Cost_Basis,Proceeds\n\
             ,RSU,1,01/05/2024,02/01/2024,$1,$2\n",
        );
        assert_eq!(err, "Error on row 2 of foo.csv: Symbol is empty");
    }
}
