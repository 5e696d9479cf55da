//! Workbook Summary
//!
//! ワークブックの構造（シート名・列ラベル・行数・先頭行のサンプル）を報告する診断用の処理。
//! 変換結果には影響しません。

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SubjectsError;
use crate::grid::SheetGrid;
use crate::source::TabularSource;

/// サンプルとして出力する行数の既定値
pub const DEFAULT_SAMPLE_ROWS: usize = 3;

/// 1シート分のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: usize,
    /// 先頭のデータ行（列ラベル → 値）
    pub sample: Vec<Map<String, Value>>,
}

impl SheetSummary {
    /// グリッドからサマリーを作成する
    pub fn from_grid(name: impl Into<String>, grid: &SheetGrid, sample_rows: usize) -> Self {
        let columns = grid.columns().to_vec();
        let sample = (0..grid.row_count().min(sample_rows))
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(col, label)| (label.clone(), grid.cell(row, col).to_json()))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            row_count: grid.row_count(),
            sample,
        }
    }
}

/// ワークブック全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookSummary {
    pub sheets: Vec<SheetSummary>,
}

impl WorkbookSummary {
    /// 入力の全シートを宣言順に調べる
    ///
    /// # 引数
    ///
    /// * `source` - 調べる入力
    /// * `sample_rows` - サンプルとして含める先頭データ行の数
    pub fn collect<S: TabularSource>(
        source: &mut S,
        sample_rows: usize,
    ) -> Result<Self, SubjectsError> {
        let mut sheets = Vec::new();
        for name in source.sheet_names() {
            let grid = source.sheet(&name)?;
            sheets.push(SheetSummary::from_grid(name, &grid, sample_rows));
        }
        Ok(Self { sheets })
    }

    /// 人が読むためのテキストとして出力する
    ///
    /// # 出力例
    ///
    /// ```text
    ///
    /// Excel File Analysis:
    /// ===================
    /// Total Sheets: 1
    ///
    /// Sheet Details:
    ///
    /// Sheet: Renal
    /// Columns: Topic, Difficulty
    /// Total Rows: 2
    ///
    /// Sample Data:
    /// [ ... ]
    /// ```
    pub fn render_text<W: Write>(&self, writer: &mut W) -> Result<(), SubjectsError> {
        writeln!(writer, "\nExcel File Analysis:")?;
        writeln!(writer, "===================")?;
        writeln!(writer, "Total Sheets: {}", self.sheets.len())?;
        writeln!(writer, "\nSheet Details:")?;

        for sheet in &self.sheets {
            writeln!(writer, "\nSheet: {}", sheet.name)?;
            writeln!(writer, "Columns: {}", sheet.columns.join(", "))?;
            writeln!(writer, "Total Rows: {}", sheet.row_count)?;
            writeln!(writer, "\nSample Data:")?;
            writeln!(writer, "{}", serde_json::to_string_pretty(&sheet.sample)?)?;
        }

        Ok(())
    }

    /// テキスト出力を文字列として返す
    pub fn to_text(&self) -> Result<String, SubjectsError> {
        let mut buffer = Vec::new();
        self.render_text(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            SubjectsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
