//! Grid Module
//!
//! 1枚のシートを「列ラベル + データ行の2次元グリッド」として表現するモジュール。
//! 変換処理とサマリー出力はどちらもこの構造だけを参照します。

use std::collections::HashMap;

use crate::types::{CellCoord, CellValue};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// シートのグリッド
///
/// `rows`はデータ行のみを保持します。ヘッダー行を列ラベルとして読み取った場合、
/// ヘッダー行は`rows`に含まれず、`origin`が`rows[0][0]`のシート上の座標を指します。
/// 行ごとの長さは揃っている必要はなく、範囲外のセルは欠損として扱われます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    /// 列ラベル
    columns: Vec<String>,

    /// データ行（行 × 列）
    rows: Vec<Vec<CellValue>>,

    /// `rows[0][0]`のシート上の座標（0始まり）
    origin: (u32, u32),
}

impl SheetGrid {
    /// 列ラベルとデータ行からグリッドを生成
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            columns,
            rows,
            origin: (0, 0),
        }
    }

    /// データ行のみからグリッドを生成
    ///
    /// 列ラベルは位置（`"0"`, `"1"`, ...）から生成されます。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxsubjects::{CellValue, SheetGrid};
    ///
    /// let grid = SheetGrid::from_rows(vec![
    ///     vec!["Renal:".into()],
    ///     vec!["AKI".into(), 3i64.into(), 4i64.into(), 5i64.into()],
    /// ]);
    /// assert_eq!(grid.row_count(), 2);
    /// assert_eq!(grid.columns(), ["0", "1", "2", "3"]);
    /// assert_eq!(grid.cell(0, 1), &CellValue::Empty);
    /// ```
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(|i| i.to_string()).collect();
        Self::new(columns, rows)
    }

    /// `rows[0][0]`のシート上の座標を設定する（エラー表示のA1座標に使用）
    pub fn with_origin(mut self, row: u32, col: u32) -> Self {
        self.origin = (row, col);
        self
    }

    /// 列ラベル
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// データ行
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// データ行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// データ行が1行もないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定位置のセルを取得（範囲外は`CellValue::Empty`）
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// グリッド上の位置をシート上の座標に変換
    pub(crate) fn sheet_coord(&self, row: usize, col: usize) -> CellCoord {
        CellCoord::new(self.origin.0 + row as u32, self.origin.1 + col as u32)
    }

    /// シート上の行番号（1始まり）
    pub(crate) fn sheet_row_number(&self, row: usize) -> u32 {
        self.origin.0 + row as u32 + 1
    }
}

/// ヘッダー行のセルから列ラベルを生成する
///
/// * 空のセル → `Unnamed: <列インデックス>`
/// * 重複ラベル → `<ラベル>.<n>`（n = 1, 2, ...）
pub(crate) fn column_labels(header: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(width);

    for idx in 0..width {
        let base = match header.get(idx) {
            Some(CellValue::Empty) | None => format!("Unnamed: {}", idx),
            Some(value) => value.as_display_string(),
        };

        let label = match seen.get(&base).copied() {
            None => base.clone(),
            Some(mut suffix) => {
                let mut candidate = format!("{}.{}", base, suffix);
                while seen.contains_key(&candidate) {
                    suffix += 1;
                    candidate = format!("{}.{}", base, suffix);
                }
                seen.insert(base.clone(), suffix + 1);
                candidate
            }
        };

        seen.entry(label.clone()).or_insert(1);
        labels.push(label);
    }

    labels
}
