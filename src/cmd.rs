use clap::Parser;

use crate::{
    app::{run_app_to_console, Options},
    portfolio::{
        bookkeeping::{
            WashSaleConfig, LONG_TERM_MIN_DAYS_EXCLUSIVE, WASH_SALE_WINDOW_DAYS,
        },
        csv_common::CsvCol,
        io::tx_table::{TxTableFormat, TxTableParseOptions},
    },
    util::{
        date::parse_dyn_date_format,
        rw::{DescribedReader, WriteHandle},
    },
    write_errln,
};

const ABOUT: &str = "Wash sale adjustment tool for sold stock lots";

fn get_long_about() -> String {
    format!(
        "\
A cli tool which applies the wash sale rule to a list of sold stock lots
(eg. from a brokerage 1099-B), and reports the adjusted cost basis,
adjusted acquisition date, deferred loss, and realized gain or loss of each.

A loss on a lot is deferred into the first unused lot of the same symbol
which was acquired within {} days (before or after) of the loss sale.

Each input file should contain a header with these column names:
{}
Files are whitespace-separated, unless named *.csv (or --csv is given).
Dollar amounts may contain '$' and ','. Dates are MM/DD/YYYY by default.",
        WASH_SALE_WINDOW_DAYS,
        CsvCol::input_cols().join(", ")
    )
}

#[derive(Parser, Debug)]
#[command(version = crate::app::APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    /// Input files. Use - for stdin.
    #[arg(required = true)]
    pub tx_files: Vec<String>,

    /// Print verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Format of how dates appear in the input files.
    /// The default is "[month]/[day]/[year]".
    ///
    /// See https://time-rs.github.io/book/api/format-description.html
    #[arg(long)]
    pub date_fmt: Option<String>,

    /// Treat all input as comma-separated, regardless of file name
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Days before or after a loss sale within which an acquisition is a
    /// replacement
    #[arg(long, default_value_t = WASH_SALE_WINDOW_DAYS)]
    pub window_days: i64,

    /// Lots held for more than this many days are long term
    #[arg(long, default_value_t = LONG_TERM_MIN_DAYS_EXCLUSIVE)]
    pub long_term_days: i64,

    /// Print all digits in output values
    #[arg(long, default_value_t = false)]
    pub print_full_values: bool,

    /// Write output as CSV to the specified directory.
    #[arg(short = 'd', long)]
    pub csv_output_dir: Option<String>,

    /// Write output as json to stdout
    #[arg(long, default_value_t = false, conflicts_with = "csv_output_dir")]
    pub json: bool,
}

fn options_from_args(args: &Args) -> Result<Options, String> {
    if args.window_days < 0 {
        return Err(format!("Invalid --window-days {}", args.window_days));
    }
    if args.long_term_days < 0 {
        return Err(format!("Invalid --long-term-days {}", args.long_term_days));
    }

    let date_format = match &args.date_fmt {
        Some(fmt) => Some(
            parse_dyn_date_format(fmt)
                .map_err(|e| format!("Invalid --date-fmt \"{fmt}\": {e}"))?,
        ),
        None => None,
    };

    Ok(Options {
        render_full_values: args.print_full_values,
        csv_output_dir: args.csv_output_dir.clone(),
        json_output: args.json,
        parse_options: TxTableParseOptions {
            date_format,
            format: if args.csv { Some(TxTableFormat::Csv) } else { None },
        },
        wash_sale_config: WashSaleConfig {
            window_days: args.window_days,
            long_term_days: args.long_term_days,
            ..WashSaleConfig::default()
        },
    })
}

/// Returns the process exit code.
pub fn command_main() -> i32 {
    let args = Args::parse();

    if args.verbose {
        crate::tracing::enable_trace_env("washsale=debug");
    }
    crate::tracing::setup_tracing();
    crate::log::set_verbose(args.verbose);

    tracing::debug!("command_main: {:#?}", args);

    let mut err_printer = WriteHandle::stderr_write_handle();

    let options = match options_from_args(&args) {
        Ok(o) => o,
        Err(e) => {
            write_errln!(err_printer, "Error: {e}");
            return 2;
        }
    };

    tracing::debug!("command_main: {:#?}", options);

    let readers: Vec<DescribedReader> = args
        .tx_files
        .iter()
        .map(|f| DescribedReader::from_cli_arg(f))
        .collect();

    match run_app_to_console(readers, options, err_printer) {
        Ok(()) => 0,
        Err(()) => 1,
    }
}
