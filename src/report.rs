//! Conversion Report
//!
//! 変換時にスキップしたシートと行の記録。

use std::fmt;

use crate::model::SubjectsData;

/// シートをスキップした理由
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSkipReason {
    /// 除外シート名に一致した（`Export Summary`は常に除外）
    Excluded,
    /// データ行がない
    Empty,
    /// 有効なトピック行がない
    NoTopics,
    /// シートを読み込めなかった
    Unreadable(String),
}

impl fmt::Display for SheetSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSkipReason::Excluded => write!(f, "excluded by name"),
            SheetSkipReason::Empty => write!(f, "no data rows"),
            SheetSkipReason::NoTopics => write!(f, "no complete topic rows"),
            SheetSkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

/// スキップしたシート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSheet {
    pub sheet: String,
    pub reason: SheetSkipReason,
}

/// スキップした行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// シート名
    pub sheet: String,
    /// シート上の行番号（1始まり）
    pub row: u32,
    /// 欠損していた項目（`name`, `difficulty`, `clinicalImportance`, `examRelevance`）
    pub missing: Vec<&'static str>,
}

impl SkippedRow {
    /// 4項目すべてが欠損している（空行）
    pub fn is_blank(&self) -> bool {
        self.missing.len() == 4
    }
}

/// 変換結果とスキップ記録
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// 出力対象の科目
    pub subjects: SubjectsData,
    /// スキップしたシート（処理順）
    pub skipped_sheets: Vec<SkippedSheet>,
    /// スキップした行（処理順）
    pub skipped_rows: Vec<SkippedRow>,
}

impl ConversionReport {
    /// 出力されたトピックの総数
    pub fn topic_count(&self) -> usize {
        self.subjects.iter().map(|s| s.topics.len()).sum()
    }

    /// 一部の項目だけが欠損していた行（空行を除く）
    pub fn partial_rows(&self) -> impl Iterator<Item = &SkippedRow> {
        self.skipped_rows.iter().filter(|row| !row.is_blank())
    }
}
