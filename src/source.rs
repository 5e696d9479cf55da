//! Tabular Source Module
//!
//! 変換処理の入力となる「名前付きシートの集合」を抽象化するトレイトと、
//! メモリ上で組み立てるワークブック実装を提供します。

use crate::error::SubjectsError;
use crate::grid::SheetGrid;

/// シート名の一覧とシートごとのグリッドを提供する入力
///
/// calamineでファイルを読む`WorkbookParser`と、テストや他のデータ源から
/// 直接組み立てる`MemoryWorkbook`が実装しています。
pub trait TabularSource {
    /// 宣言順のシート名
    fn sheet_names(&self) -> Vec<String>;

    /// シートのグリッドを取得する
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetGrid)` - シートの読み込みに成功した場合
    /// * `Err(SubjectsError)` - シートが存在しない、または読み込めない場合
    fn sheet(&mut self, name: &str) -> Result<SheetGrid, SubjectsError>;
}

/// メモリ上のワークブック
///
/// # 使用例
///
/// ```rust
/// use xlsxsubjects::{MemoryWorkbook, SheetGrid, TabularSource};
///
/// let mut workbook = MemoryWorkbook::new()
///     .with_sheet("Renal", SheetGrid::from_rows(vec![vec!["Renal:".into()]]))
///     .with_sheet("Export Summary", SheetGrid::default());
///
/// assert_eq!(workbook.sheet_names(), vec!["Renal", "Export Summary"]);
/// assert!(workbook.sheet("Missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, SheetGrid)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// シートを末尾に追加する
    pub fn with_sheet(mut self, name: impl Into<String>, grid: SheetGrid) -> Self {
        self.push_sheet(name, grid);
        self
    }

    /// シートを末尾に追加する（同名のシートは置き換え、位置は維持）
    pub fn push_sheet(&mut self, name: impl Into<String>, grid: SheetGrid) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = grid,
            None => self.sheets.push((name, grid)),
        }
    }
}

impl TabularSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet(&mut self, name: &str) -> Result<SheetGrid, SubjectsError> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| SubjectsError::Config(format!("Sheet '{}' not found", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_order_is_preserved() {
        let workbook = MemoryWorkbook::new()
            .with_sheet("B", SheetGrid::default())
            .with_sheet("A", SheetGrid::default())
            .with_sheet("C", SheetGrid::default());
        assert_eq!(workbook.sheet_names(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_push_sheet_replaces_in_place() {
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("A", SheetGrid::default())
            .with_sheet("B", SheetGrid::default());
        let grid = SheetGrid::from_rows(vec![vec!["x".into()]]);
        workbook.push_sheet("A", grid.clone());

        assert_eq!(workbook.sheet_names(), vec!["A", "B"]);
        assert_eq!(workbook.sheet("A").unwrap(), grid);
    }

    #[test]
    fn test_missing_sheet_is_config_error() {
        let mut workbook = MemoryWorkbook::new();
        match workbook.sheet("Nope") {
            Err(SubjectsError::Config(msg)) => assert!(msg.contains("Nope")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
