//! CLI Commands
//!
//! `convert-subjects`と`analyze-workbook`の2つのバイナリが共有するコマンド実装。
//! 引数はすべて省略可能で、省略時は既定のパスを使用します。

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::builder::ConverterBuilder;
use crate::error::SubjectsError;
use crate::output::{OutputFormat, DEFAULT_CONST_NAME};
use crate::parser::WorkbookParser;
use crate::report::ConversionReport;
use crate::summary::{WorkbookSummary, DEFAULT_SAMPLE_ROWS};

/// 既定の入力ファイル
pub const DEFAULT_INPUT: &str = "attached_assets/Difficulty ranking UKMLA Excel.xlsx";

/// 既定の出力ファイル
pub const DEFAULT_OUTPUT: &str = "client/src/data/masterSubjects.ts";

/// 出力フォーマットの指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// TypeScriptモジュール
    Typescript,
    /// JSON配列
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Typescript => OutputFormat::TypeScript,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Convert a topic-ratings spreadsheet into a typed TypeScript data module
#[derive(Debug, Clone, Parser)]
#[command(name = "convert-subjects", version)]
pub struct ConvertArgs {
    /// Spreadsheet to read
    #[arg(short, long, env = "XLSXSUBJECTS_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Module to write ('-' for stdout); overwritten if it exists
    #[arg(short, long, env = "XLSXSUBJECTS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Name of the exported constant
    #[arg(long, default_value = DEFAULT_CONST_NAME)]
    pub const_name: String,

    /// Extra sheet names to leave out, on top of 'Export Summary' (repeatable)
    #[arg(long = "exclude", value_name = "SHEET")]
    pub excluded_sheets: Vec<String>,

    /// Reject ratings below this value
    #[arg(long, requires = "max_rating", allow_hyphen_values = true)]
    pub min_rating: Option<i64>,

    /// Reject ratings above this value
    #[arg(long, requires = "min_rating", allow_hyphen_values = true)]
    pub max_rating: Option<i64>,

    /// Treat the first spreadsheet row as data instead of column labels
    #[arg(long)]
    pub no_header: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Typescript)]
    pub format: FormatArg,

    /// Log skipped sheets and rows
    #[arg(short, long)]
    pub verbose: bool,
}

/// Print a structural summary of every sheet in a spreadsheet
#[derive(Debug, Clone, Parser)]
#[command(name = "analyze-workbook", version)]
pub struct AnalyzeArgs {
    /// Spreadsheet to read
    #[arg(short, long, env = "XLSXSUBJECTS_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Number of leading data rows to show per sheet
    #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub sample_rows: usize,

    /// Treat the first spreadsheet row as data instead of column labels
    #[arg(long)]
    pub no_header: bool,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// ログ出力を初期化する（stderrに出力）
///
/// `verbose`の場合は`debug`レベル、それ以外は`RUST_LOG`（未設定なら`warn`）に従います。
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("xlsxsubjects=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // 既に初期化済みの場合（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// スプレッドシートを変換して出力先に書き出す
///
/// 変換がすべて成功してから出力ファイルを作成するため、失敗時に既存の出力は壊れません。
pub fn convert(args: &ConvertArgs) -> Result<ConversionReport, SubjectsError> {
    let mut builder = ConverterBuilder::new()
        .with_const_name(args.const_name.clone())
        .with_excluded_sheets(args.excluded_sheets.clone())
        .with_header_row(!args.no_header)
        .with_output_format(args.format.into());
    if let (Some(min), Some(max)) = (args.min_rating, args.max_rating) {
        builder = builder.with_rating_bounds(min, max);
    }
    let converter = builder.build()?;

    let input = File::open(&args.input)?;
    let report = converter.convert_reader(input)?;

    if is_stdout(&args.output) {
        let stdout = io::stdout();
        converter.write_output(&report.subjects, stdout.lock())?;
    } else {
        if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let output = File::create(&args.output)?;
        converter.write_output(&report.subjects, output)?;
        info!(
            output = %args.output.display(),
            subjects = report.subjects.len(),
            topics = report.topic_count(),
            "wrote module"
        );
    }

    Ok(report)
}

/// ワークブックのサマリーを作成し、`writer`に出力する
pub fn analyze<W: Write>(args: &AnalyzeArgs, writer: &mut W) -> Result<WorkbookSummary, SubjectsError> {
    let mut parser = WorkbookParser::open_path(&args.input)?.with_header_row(!args.no_header);
    let summary = WorkbookSummary::collect(&mut parser, args.sample_rows)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
    } else {
        summary.render_text(writer)?;
    }
    writer.flush()?;

    Ok(summary)
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// エラー内容を分類してstderrに出力する
pub fn handle_error(error: &SubjectsError) {
    match error {
        SubjectsError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        SubjectsError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        SubjectsError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        SubjectsError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        SubjectsError::MissingSubjectName { sheet } => {
            eprintln!("Missing Subject Name:");
            eprintln!("  Sheet: {}", sheet);
            eprintln!("  The first cell of the sheet's data must hold the subject name.");
        }
        SubjectsError::InvalidRating { sheet, cell, value } => {
            eprintln!("Invalid Rating:");
            eprintln!("  Sheet: {}", sheet);
            eprintln!("  Cell: {}", cell);
            eprintln!("  Value: '{}' is not an integer", value);
        }
        SubjectsError::RatingOutOfRange {
            sheet,
            cell,
            value,
            min,
            max,
        } => {
            eprintln!("Rating Out Of Range:");
            eprintln!("  Sheet: {}", sheet);
            eprintln!("  Cell: {}", cell);
            eprintln!("  Value: {} (allowed: {}..={})", value, min, max);
        }
        SubjectsError::InvalidModule(msg) => {
            eprintln!("Invalid Module: {}", msg);
        }
        SubjectsError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_args_defaults() {
        let args = ConvertArgs::parse_from(["convert-subjects"]);
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(args.const_name, "masterSubjects");
        assert!(args.excluded_sheets.is_empty());
        assert_eq!(args.min_rating, None);
        assert!(!args.no_header);
        assert_eq!(args.format, FormatArg::Typescript);
    }

    #[test]
    fn test_convert_args_overrides() {
        let args = ConvertArgs::parse_from([
            "convert-subjects",
            "--input",
            "in.xlsx",
            "--output",
            "-",
            "--exclude",
            "Summary",
            "--exclude",
            "Notes",
            "--min-rating",
            "1",
            "--max-rating",
            "10",
            "--format",
            "json",
        ]);
        assert_eq!(args.input, PathBuf::from("in.xlsx"));
        assert!(is_stdout(&args.output));
        assert_eq!(args.excluded_sheets, vec!["Summary", "Notes"]);
        assert_eq!((args.min_rating, args.max_rating), (Some(1), Some(10)));
        assert_eq!(OutputFormat::from(args.format), OutputFormat::Json);
    }

    #[test]
    fn test_rating_bounds_require_both_ends() {
        let result = ConvertArgs::try_parse_from(["convert-subjects", "--min-rating", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_args_defaults() {
        let args = AnalyzeArgs::parse_from(["analyze-workbook"]);
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.sample_rows, 3);
        assert!(!args.json);
    }

    #[test]
    fn test_convert_missing_input_is_io_error() {
        let args = ConvertArgs::parse_from(["convert-subjects", "--input", "no/such/file.xlsx"]);
        assert!(matches!(convert(&args), Err(SubjectsError::Io(_))));
    }
}
