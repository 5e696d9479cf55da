//! xlsxsubjects - Convert spreadsheet topic ratings into a typed TypeScript data module
//!
//! このクレートは、科目ごとのシートに「トピック名 + 3つの評価値（難易度・臨床的重要度・
//! 試験での重要度）」が並んだスプレッドシートを読み込み、型定義付きのTypeScriptデータ
//! モジュールへ変換します。診断用にワークブックの構造サマリーも出力できます。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxsubjects::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("ratings.xlsx")?;
//!     let output = File::create("masterSubjects.ts")?;
//!
//!     let report = converter.convert_to_writer(input, output)?;
//!     println!("{} subjects, {} topics", report.subjects.len(), report.topic_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! # In-memory sources
//!
//! シートは`TabularSource`トレイトを通じて読み込まれるため、ファイル以外の入力も
//! `MemoryWorkbook`で組み立てて変換できます。
//!
//! ```rust
//! use xlsxsubjects::{ConverterBuilder, MemoryWorkbook, SheetGrid};
//!
//! # fn main() -> Result<(), xlsxsubjects::SubjectsError> {
//! let mut source = MemoryWorkbook::new()
//!     .with_sheet(
//!         "Cardiology",
//!         SheetGrid::from_rows(vec![
//!             vec!["  Cardiology:  ".into()],
//!             vec!["Heart failure".into(), 7i64.into(), 9i64.into(), 8i64.into()],
//!         ]),
//!     )
//!     .with_sheet(
//!         "Export Summary",
//!         SheetGrid::from_rows(vec![
//!             vec!["Summary".into()],
//!             vec!["All".into(), 1i64.into(), 1i64.into(), 1i64.into()],
//!         ]),
//!     );
//!
//! let subjects = ConverterBuilder::new().build()?.convert(&mut source)?;
//! assert_eq!(subjects.len(), 1);
//! assert_eq!(subjects[0].name, "Cardiology");
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
pub mod cli;
mod error;
mod grid;
mod model;
mod output;
mod parser;
mod report;
mod security;
mod source;
mod summary;
mod types;

// 公開API
pub use api::{RatingBounds, SheetSelector};
pub use builder::{Converter, ConverterBuilder, EXPORT_SUMMARY_SHEET};
pub use error::SubjectsError;
pub use grid::SheetGrid;
pub use model::{Subject, SubjectsData, Topic, TopicRating};
pub use output::{parse_module, OutputFormat, TypeScriptModule, DEFAULT_CONST_NAME};
pub use parser::WorkbookParser;
pub use report::{ConversionReport, SheetSkipReason, SkippedRow, SkippedSheet};
pub use source::{MemoryWorkbook, TabularSource};
pub use summary::{SheetSummary, WorkbookSummary, DEFAULT_SAMPLE_ROWS};
pub use types::CellValue;
