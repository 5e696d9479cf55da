//! CLI Tests
//!
//! Drives the shared command functions of both binaries against files in a
//! temporary directory.

use clap::Parser;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xlsxsubjects::cli::{self, AnalyzeArgs, ConvertArgs};
use xlsxsubjects::{parse_module, SubjectsError, TopicRating};

fn write_ratings_workbook(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("Export Summary")?;
    summary.write_string(0, 0, "Topic")?;
    summary.write_string(1, 0, "Summary:")?;

    let renal = workbook.add_worksheet();
    renal.set_name("Renal")?;
    renal.write_string(0, 0, "Topic")?;
    renal.write_string(0, 1, "Difficulty")?;
    renal.write_string(0, 2, "Clinical Importance")?;
    renal.write_string(0, 3, "Exam Relevance")?;
    renal.write_string(1, 0, "Renal:")?;
    renal.write_string(2, 0, "AKI")?;
    renal.write_number(2, 1, 3.0)?;
    renal.write_number(2, 2, 4.0)?;
    renal.write_number(2, 3, 5.0)?;

    workbook.save(path)
}

fn convert_args(input: &Path, output: &Path, extra: &[&str]) -> ConvertArgs {
    let mut argv = vec![
        "convert-subjects".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    ConvertArgs::parse_from(argv)
}

fn write_sheet_with_topic(
    workbook: &mut Workbook,
    sheet: &str,
    subject: &str,
    topic: &str,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;
    worksheet.write_string(0, 0, "Topic")?;
    worksheet.write_string(1, 0, subject)?;
    worksheet.write_string(2, 0, topic)?;
    worksheet.write_number(2, 1, 1.0)?;
    worksheet.write_number(2, 2, 2.0)?;
    worksheet.write_number(2, 3, 3.0)?;
    Ok(())
}

#[test]
fn test_convert_writes_module() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("client/src/data/masterSubjects.ts");
    write_ratings_workbook(&input).unwrap();

    let report = cli::convert(&convert_args(&input, &output, &[])).unwrap();
    assert_eq!(report.subjects.len(), 1);

    let module = fs::read_to_string(&output).unwrap();
    let subjects = parse_module(&module).unwrap();
    assert_eq!(subjects, report.subjects);
    assert_eq!(subjects[0].name, "Renal");
    assert_eq!(subjects[0].topics[0].ratings, TopicRating::new(3, 4, 5));
}

#[test]
fn test_convert_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("out.ts");
    write_ratings_workbook(&input).unwrap();
    fs::write(&output, "stale contents that are much longer than nothing").unwrap();

    cli::convert(&convert_args(&input, &output, &["--const-name", "subjects"])).unwrap();

    let module = fs::read_to_string(&output).unwrap();
    assert!(!module.contains("stale"));
    assert!(module.ends_with("export default subjects;\n"));
}

#[test]
fn test_convert_failure_leaves_output_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.xlsx");
    let output = dir.path().join("out.ts");
    fs::write(&output, "previous").unwrap();

    let result = cli::convert(&convert_args(&input, &output, &[]));
    assert!(matches!(result, Err(SubjectsError::Io(_))));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn test_convert_rating_bounds_violation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("out.ts");
    write_ratings_workbook(&input).unwrap();

    let args = convert_args(&input, &output, &["--min-rating", "1", "--max-rating", "4"]);
    match cli::convert(&args) {
        Err(SubjectsError::RatingOutOfRange { cell, value, .. }) => {
            assert_eq!(cell, "D3");
            assert_eq!(value, 5);
        }
        other => panic!("Expected RatingOutOfRange, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_convert_invalid_const_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("out.ts");
    write_ratings_workbook(&input).unwrap();

    let args = convert_args(&input, &output, &["--const-name", "master-subjects"]);
    assert!(matches!(cli::convert(&args), Err(SubjectsError::Config(_))));
}

#[test]
fn test_convert_json_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("subjects.json");
    write_ratings_workbook(&input).unwrap();

    cli::convert(&convert_args(&input, &output, &["--format", "json"])).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value[0]["topics"][0]["name"], "AKI");
}

#[test]
fn test_analyze_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    write_ratings_workbook(&input).unwrap();

    let args = AnalyzeArgs::parse_from([
        "analyze-workbook",
        "--input",
        input.to_str().unwrap(),
        "--sample-rows",
        "1",
    ]);
    let mut out = Vec::new();
    let summary = cli::analyze(&args, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.sheets.len(), 2);
    assert!(text.contains("Total Sheets: 2\n"));
    assert!(text.contains("\nSheet: Export Summary\nColumns: Topic\nTotal Rows: 1\n"));
    assert!(text.contains(
        "\nSheet: Renal\nColumns: Topic, Difficulty, Clinical Importance, Exam Relevance\nTotal Rows: 2\n"
    ));
}

#[test]
fn test_analyze_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    write_ratings_workbook(&input).unwrap();

    let args = AnalyzeArgs::parse_from([
        "analyze-workbook",
        "--input",
        input.to_str().unwrap(),
        "--json",
    ]);
    let mut out = Vec::new();
    cli::analyze(&args, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["sheets"][1]["name"], "Renal");
    assert_eq!(value["sheets"][1]["row_count"], 2);
    assert_eq!(value["sheets"][1]["sample"][1]["Exam Relevance"], 5);
}

#[test]
fn test_analyze_missing_file() {
    let args = AnalyzeArgs::parse_from(["analyze-workbook", "--input", "no/such/book.xlsx"]);
    let mut out = Vec::new();
    assert!(matches!(
        cli::analyze(&args, &mut out),
        Err(SubjectsError::Io(_))
    ));
    assert!(out.is_empty());
}

#[test]
fn test_convert_exclude_adds_to_export_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ratings.xlsx");
    let output = dir.path().join("out.ts");

    let mut workbook = Workbook::new();
    write_sheet_with_topic(&mut workbook, "Export Summary", "Summary:", "All topics").unwrap();
    write_sheet_with_topic(&mut workbook, "Notes", "Notes:", "Reminder").unwrap();
    write_sheet_with_topic(&mut workbook, "Renal", "Renal:", "AKI").unwrap();
    workbook.save(&input).unwrap();

    let args = convert_args(&input, &output, &["--exclude", "Notes"]);
    assert_eq!(args.excluded_sheets, vec!["Notes"]);

    let report = cli::convert(&args).unwrap();
    let names: Vec<_> = report.subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Renal"]);

    let module = fs::read_to_string(&output).unwrap();
    assert!(!module.contains("All topics"));
    assert!(!module.contains("Reminder"));
}
