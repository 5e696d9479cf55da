//! analyze-workbook
//!
//! Prints sheet names, column labels, row counts and sample rows of a spreadsheet.

use std::io;
use std::process;

use clap::Parser;
use xlsxsubjects::cli::{self, AnalyzeArgs};

fn main() {
    let args = AnalyzeArgs::parse();
    cli::init_logging(args.verbose);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = cli::analyze(&args, &mut handle) {
        cli::handle_error(&e);
        process::exit(1);
    }
}
