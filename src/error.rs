//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxsubjectsクレート全体で使用するエラー型
///
/// ワークブックの読み込み、シートの変換、TypeScriptモジュールの出力中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// 不完全な行や空のシートはエラーではなく、スキップとして扱われます
/// （`ConversionReport`を参照）。ここに並ぶのは処理を中断すべき失敗のみです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxsubjects::SubjectsError;
/// use std::fs::File;
///
/// fn open_ratings(path: &str) -> Result<(), SubjectsError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SubjectsError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルが存在しない、出力先に書き込めないなどの場合に使用されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONのシリアライズ・デシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の検証失敗や、存在しないシートの指定などで発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// シートの先頭セル（科目名）が空
    #[error("Sheet '{sheet}' has no subject name in the first cell of its first data row")]
    MissingSubjectName {
        /// 対象のシート名
        sheet: String,
    },

    /// 評価セルを整数に変換できない
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsxsubjects::SubjectsError;
    ///
    /// let error = SubjectsError::InvalidRating {
    ///     sheet: "Renal".to_string(),
    ///     cell: "C4".to_string(),
    ///     value: "high".to_string(),
    /// };
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Invalid rating at sheet 'Renal', cell C4: 'high' is not an integer"
    /// );
    /// ```
    #[error("Invalid rating at sheet '{sheet}', cell {cell}: '{value}' is not an integer")]
    InvalidRating {
        /// エラーが発生したシート名
        sheet: String,
        /// エラーが発生したセルの座標（A1記法）
        cell: String,
        /// セルの値（表示用文字列）
        value: String,
    },

    /// 評価値が設定された範囲外
    ///
    /// `ConverterBuilder::with_rating_bounds()`を指定した場合のみ発生します。
    #[error("Rating out of range at sheet '{sheet}', cell {cell}: {value} is not within {min}..={max}")]
    RatingOutOfRange {
        /// エラーが発生したシート名
        sheet: String,
        /// エラーが発生したセルの座標（A1記法）
        cell: String,
        /// 評価値
        value: i64,
        /// 下限（含む）
        min: i64,
        /// 上限（含む）
        max: i64,
    },

    /// TypeScriptモジュールから埋め込みJSONを取り出せない
    #[error("Invalid module: {0}")]
    InvalidModule(String),

    /// セキュリティ制限に違反したエラー（入力ファイルサイズの上限など）
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
