//! Public API Types
//!
//! 公開APIで使用する設定用の型を定義するモジュール。

/// シート選択方式
///
/// 変換対象のシートを選択する方法を指定します。
/// 選択後に除外シート名（`Export Summary`と追加指定分）が適用されます。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートを宣言順に変換（デフォルト）
    All,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Renal".to_string())`
    Name(String),

    /// 複数のインデックス指定
    ///
    /// 例: `SheetSelector::Indices(vec![0, 2, 4])`
    Indices(Vec<usize>),

    /// 複数のシート名指定
    ///
    /// 例: `SheetSelector::Names(vec!["Renal".to_string(), "Cardiology".to_string()])`
    Names(Vec<String>),
}

impl SheetSelector {
    /// 宣言順のシート名一覧から対象シートを選択する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(String)` - シートが見つからない、またはインデックスが範囲外の場合
    pub(crate) fn select(&self, all_sheet_names: &[String]) -> Result<Vec<String>, String> {
        let by_index = |index: usize| {
            all_sheet_names.get(index).cloned().ok_or_else(|| {
                format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                )
            })
        };
        let by_name = |name: &String| {
            if all_sheet_names.contains(name) {
                Ok(name.clone())
            } else {
                Err(format!("Sheet '{}' not found", name))
            }
        };

        match self {
            SheetSelector::All => Ok(all_sheet_names.to_vec()),
            SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
            SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
            SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
            SheetSelector::Names(names) => names.iter().map(by_name).collect(),
        }
    }
}

/// 評価値の許容範囲（両端を含む）
///
/// 既定では範囲チェックは行いません。`ConverterBuilder::with_rating_bounds()`で指定した
/// 場合のみ、範囲外の評価値がエラーになります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBounds {
    pub min: i64,
    pub max: i64,
}

impl RatingBounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// 値が範囲内かどうか
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
