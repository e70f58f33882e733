use crate::{
    app::outfmt::{csv::CsvWriter, json::JsonWriter},
    portfolio::{
        bookkeeping::{txs_to_adjusted_list, AdjustedListResult, WashSaleConfig},
        calc_cumulative_gains,
        io::{tx_loader::load_tx_tables, tx_table::TxTableParseOptions},
        render::{render_adjusted_tx_table, render_gains_summary, RenderTable},
        CumulativeGains,
    },
    util::rw::{DescribedReader, WriteHandle},
    verboseln, write_errln,
};

use super::outfmt::{
    model::{OutputType, ReportWriter},
    text::TextWriter,
};

pub type Error = String;

#[derive(Debug)]
pub struct Options {
    pub render_full_values: bool,
    pub csv_output_dir: Option<String>,
    pub json_output: bool,
    pub parse_options: TxTableParseOptions,
    pub wash_sale_config: WashSaleConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            render_full_values: false,
            csv_output_dir: None,
            json_output: false,
            parse_options: TxTableParseOptions::default(),
            wash_sale_config: WashSaleConfig::default(),
        }
    }
}

/// Loads all lots and resolves wash sales, without any rendering.
pub fn run_app_to_adjusted_list(
    readers: Vec<DescribedReader>,
    parse_options: &TxTableParseOptions,
    cfg: &WashSaleConfig,
    mut err_printer: WriteHandle,
) -> Result<AdjustedListResult, Error> {
    let txs = load_tx_tables(&readers, parse_options, &mut err_printer)?;
    verboseln!("Loaded {} lots from {} file(s)", txs.len(), readers.len());

    let res = txs_to_adjusted_list(&txs, cfg).map_err(|e| e.to_string())?;
    verboseln!("Found {} wash sale(s)", res.matches.len());
    Ok(res)
}

pub struct AppRenderResult {
    pub adjusted: AdjustedListResult,
    pub gains: CumulativeGains,
    pub adjusted_table: RenderTable,
    pub gains_table: RenderTable,
}

/// Runs the whole app, producing a generic render model, which can then
/// be fed to any of the output writers.
pub fn run_app_to_render_model(
    readers: Vec<DescribedReader>,
    options: &Options,
    err_printer: WriteHandle,
) -> Result<AppRenderResult, Error> {
    let adjusted = run_app_to_adjusted_list(
        readers,
        &options.parse_options,
        &options.wash_sale_config,
        err_printer,
    )?;

    let gains = calc_cumulative_gains(&adjusted.adjusted);
    let adjusted_table = render_adjusted_tx_table(
        &adjusted.adjusted,
        &adjusted.matches,
        &gains,
        options.render_full_values,
    );
    let gains_table = render_gains_summary(&gains, options.render_full_values);

    Ok(AppRenderResult {
        adjusted,
        gains,
        adjusted_table,
        gains_table,
    })
}

fn write_render_result(
    render_res: &AppRenderResult,
    writer: &mut dyn ReportWriter,
) -> Result<(), Error> {
    writer
        .print_render_table(OutputType::AdjustedTransactions, &render_res.adjusted_table)
        .map_err(|e| format!("Rendering adjusted transactions: {e}"))?;
    writer
        .print_render_table(OutputType::GainsSummary, &render_res.gains_table)
        .map_err(|e| format!("Rendering gains summary: {e}"))?;
    Ok(())
}

/// Returned Err is for exit code determination only.
/// All errors are written to err_printer.
pub fn run_app_to_writer(
    writer: &mut dyn ReportWriter,
    readers: Vec<DescribedReader>,
    options: &Options,
    mut err_printer: WriteHandle,
) -> Result<AppRenderResult, ()> {
    let render_res =
        match run_app_to_render_model(readers, options, err_printer.clone()) {
            Ok(r) => r,
            Err(e) => {
                write_errln!(err_printer, "{}", e);
                return Err(());
            }
        };

    if let Err(e) = write_render_result(&render_res, writer) {
        write_errln!(err_printer, "{}", e);
        return Err(());
    }

    if !render_res.adjusted_table.errors.is_empty() {
        write_errln!(
            err_printer,
            "\n[!] There are {} problem(s) with the input. See above.",
            render_res.adjusted_table.errors.len()
        );
    }

    Ok(render_res)
}

fn make_writer(
    options: &Options,
    out_w: WriteHandle,
) -> Result<Box<dyn ReportWriter>, Error> {
    if let Some(dir_path) = &options.csv_output_dir {
        let w = CsvWriter::new(dir_path)
            .map_err(|e| format!("Failed to create output directory {dir_path}: {e}"))?;
        Ok(Box::new(w))
    } else if options.json_output {
        Ok(Box::new(JsonWriter::new(out_w)))
    } else {
        Ok(Box::new(TextWriter::new(out_w)))
    }
}

pub fn run_app_to_console(
    readers: Vec<DescribedReader>,
    options: Options,
    mut err_printer: WriteHandle,
) -> Result<(), ()> {
    let mut writer = match make_writer(&options, WriteHandle::stdout_write_handle()) {
        Ok(w) => w,
        Err(e) => {
            write_errln!(err_printer, "{e}");
            return Err(());
        }
    };

    run_app_to_writer(writer.as_mut(), readers, &options, err_printer.clone())?;

    writer.finish().map_err(|e| {
        write_errln!(err_printer, "{e}");
    })
}
