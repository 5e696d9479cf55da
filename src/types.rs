//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use calamine::Data;

/// 欠損値として扱う文字列
///
/// 元データの読み込み側（表計算リーダー）が既定で欠損とみなす表記と同じ集合です。
/// 完全一致のみを対象とし、前後の空白は取り除きません。
pub(crate) const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// セルの値を表す列挙型
///
/// スプレッドシートのセルは型を持たないスカラー値のため、境界で
/// `Empty` / `Text` / `Number` の3種類に正規化します。
///
/// # 変換規則
///
/// | calamine の値 | `CellValue` |
/// | --- | --- |
/// | `Int` / `Float` / `DateTime` | `Number`（日付はシリアル値） |
/// | `Bool` | `Number(1.0)` / `Number(0.0)` |
/// | `String`（欠損表記以外） | `Text` |
/// | `String`（欠損表記） / `Empty` | `Empty` |
/// | `Error`（`#N/A`以外） | `Text`（エラーコード） |
/// | `DateTimeIso` / `DurationIso` | `Text` |
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル（欠損）
    Empty,

    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),
}

impl CellValue {
    /// 文字列からセル値を生成する（欠損表記は`Empty`になる）
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if MISSING_MARKERS.contains(&value.as_str()) {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// 値が欠損かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値を表示用の文字列として取得
    ///
    /// 整数値の数値は小数部なしで表示されます（`3.0` → `"3"`）。
    pub fn as_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// 名前として使用する文字列を取得
    ///
    /// 文字列は前後の空白を取り除きます。空白のみの文字列は欠損として`None`を返します。
    pub fn as_name(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(n.to_string()),
        }
    }

    /// 整数に変換する
    ///
    /// * 数値: 0方向に切り捨て（NaN・無限大・i64範囲外は`None`）
    /// * 文字列: 前後の空白を除いて10進整数としてパース
    /// * 欠損: `None`
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            CellValue::Number(n) => {
                let truncated = n.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
        }
    }

    /// サマリー出力用のJSON値に変換
    ///
    /// 欠損は`null`、整数値の数値はJSONの整数になります。
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Empty => serde_json::Value::Null,
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::String(s) => CellValue::text(s.clone()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
            Data::Error(e) => CellValue::text(e.to_string()),
            Data::Empty => CellValue::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}
