//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックの各シートを`SheetGrid`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::SubjectsError;
use crate::grid::{column_labels, SheetGrid};
use crate::security::SecurityConfig;
use crate::source::TabularSource;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込み、calamineの自動判別（xlsx / xlsm / xlsb / xls / ods）で開きます。
///
/// シートの使用範囲（最初に値のあるセルから最後のセルまで）を読み取り、
/// ヘッダー行モードでは先頭行を列ラベルとして扱います。
pub struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
    /// 先頭行を列ラベルとして扱うか
    header_row: bool,
}

impl std::fmt::Debug for WorkbookParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookParser")
            .field("sheets", &self.workbook.sheet_names())
            .field("header_row", &self.header_row)
            .finish()
    }
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートのバイト列を読み込むリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(SubjectsError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(SubjectsError::Parse)` - スプレッドシートとして解析できない場合
    pub fn open<R: Read>(reader: R) -> Result<Self, SubjectsError> {
        Self::open_with_limits(reader, &SecurityConfig::default())
    }

    /// ファイルパスからワークブックを開く
    ///
    /// ファイルが存在しない場合は`SubjectsError::Io`を返します。
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, SubjectsError> {
        let file = File::open(path.as_ref())?;
        Self::open(file)
    }

    pub(crate) fn open_with_limits<R: Read>(
        reader: R,
        security: &SecurityConfig,
    ) -> Result<Self, SubjectsError> {
        let buffer = security.read_limited(reader)?;
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self {
            workbook,
            header_row: true,
        })
    }

    /// 先頭行を列ラベルとして扱うかを設定する（デフォルト: `true`）
    ///
    /// `false`の場合はすべての行をデータ行として扱い、列ラベルは位置から生成します。
    pub fn with_header_row(mut self, header_row: bool) -> Self {
        self.header_row = header_row;
        self
    }

    /// 使用範囲をグリッドに変換
    fn build_grid(&self, range: &Range<Data>) -> SheetGrid {
        let (start, end) = match (range.start(), range.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return SheetGrid::default(),
        };

        let mut rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect();

        // 末尾の空行は書式だけが残ったセルなので捨てる
        while rows
            .last()
            .is_some_and(|row| row.iter().all(CellValue::is_empty))
        {
            rows.pop();
        }

        let width = (end.1 - start.1) as usize + 1;

        if self.header_row {
            if rows.is_empty() {
                return SheetGrid::default();
            }
            let header = rows.remove(0);
            SheetGrid::new(column_labels(&header, width), rows).with_origin(start.0 + 1, start.1)
        } else {
            let columns = (0..width).map(|i| i.to_string()).collect();
            SheetGrid::new(columns, rows).with_origin(start.0, start.1)
        }
    }
}

impl TabularSource for WorkbookParser {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn sheet(&mut self, name: &str) -> Result<SheetGrid, SubjectsError> {
        let range = self.workbook.worksheet_range(name)?;
        Ok(self.build_grid(&range))
    }
}

// 実際のファイルを使うテストは統合テスト（tests/）で実装します。
