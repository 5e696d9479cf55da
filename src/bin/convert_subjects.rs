//! convert-subjects
//!
//! Reads the topic-ratings spreadsheet and writes the TypeScript data module.

use std::process;

use clap::Parser;
use xlsxsubjects::cli::{self, ConvertArgs};

fn main() {
    let args = ConvertArgs::parse();
    cli::init_logging(args.verbose);

    match cli::convert(&args) {
        Ok(report) => {
            if args.output.as_os_str() != "-" {
                println!(
                    "Conversion completed: {} -> {} ({} subjects, {} topics)",
                    args.input.display(),
                    args.output.display(),
                    report.subjects.len(),
                    report.topic_count()
                );
            }
        }
        Err(e) => {
            cli::handle_error(&e);
            process::exit(1);
        }
    }
}
