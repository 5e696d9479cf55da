//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。
//! `Converter`はシートごとのグリッドを科目・トピックへ変換する本体です。

use std::io::{BufWriter, Read, Write};

use tracing::{debug, info, warn};

use crate::api::{RatingBounds, SheetSelector};
use crate::error::SubjectsError;
use crate::grid::SheetGrid;
use crate::model::{Subject, SubjectsData, Topic, TopicRating};
use crate::output::{is_valid_identifier, OutputFormat, OutputFormatter, DEFAULT_CONST_NAME};
use crate::parser::WorkbookParser;
use crate::report::{ConversionReport, SheetSkipReason, SkippedRow, SkippedSheet};
use crate::security::SecurityConfig;
use crate::source::TabularSource;

/// 常に除外するシート名
pub const EXPORT_SUMMARY_SHEET: &str = "Export Summary";

/// 評価列の項目名（列1〜3の順）
const RATING_FIELDS: [&str; 3] = ["difficulty", "clinicalImportance", "examRelevance"];

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// `Export Summary`に加えて除外するシート名（完全一致）
    pub excluded_sheets: Vec<String>,

    /// 先頭行を列ラベルとして扱うか（ファイル入力時のみ）
    pub header_row: bool,

    /// 評価値の許容範囲（Noneの場合はチェックしない）
    pub rating_bounds: Option<RatingBounds>,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// TypeScriptモジュールの定数名
    pub const_name: String,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            excluded_sheets: Vec::new(),
            header_row: true,
            rating_bounds: None,
            output_format: OutputFormat::TypeScript,
            const_name: DEFAULT_CONST_NAME.to_string(),
            max_input_size: SecurityConfig::default().max_input_file_size,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use xlsxsubjects::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxsubjects::SubjectsError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Indices(vec![0, 1]))
///     .with_rating_bounds(1, 10)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 除外シート: `Export Summary`
    /// - ヘッダー行: 先頭行を列ラベルとして扱う
    /// - 評価値の範囲チェック: なし
    /// - 出力: TypeScriptモジュール（定数名 `masterSubjects`）
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 除外するシート名を追加する
    ///
    /// `Export Summary`は指定に関わらず常に除外されます。
    pub fn with_excluded_sheets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .excluded_sheets
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// ファイル入力時に先頭行を列ラベルとして扱うかを指定する
    pub fn with_header_row(mut self, header_row: bool) -> Self {
        self.config.header_row = header_row;
        self
    }

    /// 評価値の許容範囲（両端を含む）を指定する
    ///
    /// 範囲外の評価値は`SubjectsError::RatingOutOfRange`になります。
    pub fn with_rating_bounds(mut self, min: i64, max: i64) -> Self {
        self.config.rating_bounds = Some(RatingBounds::new(min, max));
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// TypeScriptモジュールの定数名を指定する
    pub fn with_const_name(mut self, name: impl Into<String>) -> Self {
        self.config.const_name = name.into();
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `SubjectsError::Config(String)`: 設定の検証に失敗した場合
    ///   * 評価値の範囲の下限が上限より大きい
    ///   * 定数名がJavaScriptの識別子として無効
    pub fn build(self) -> Result<Converter, SubjectsError> {
        if let Some(bounds) = self.config.rating_bounds {
            if bounds.min > bounds.max {
                return Err(SubjectsError::Config(format!(
                    "Invalid rating bounds: min ({}) > max ({})",
                    bounds.min, bounds.max
                )));
            }
        }

        if !is_valid_identifier(&self.config.const_name) {
            return Err(SubjectsError::Config(format!(
                "Invalid constant name: '{}'",
                self.config.const_name
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// # 使用例
///
/// ```rust
/// use xlsxsubjects::{ConverterBuilder, MemoryWorkbook, SheetGrid};
///
/// # fn main() -> Result<(), xlsxsubjects::SubjectsError> {
/// let mut source = MemoryWorkbook::new().with_sheet(
///     "Renal",
///     SheetGrid::from_rows(vec![
///         vec!["Renal:".into()],
///         vec!["AKI".into(), 3i64.into(), 4i64.into(), 5i64.into()],
///         vec!["CKD".into(), None::<i64>.into(), 2i64.into(), 3i64.into()],
///     ]),
/// );
///
/// let converter = ConverterBuilder::new().build()?;
/// let subjects = converter.convert(&mut source)?;
///
/// assert_eq!(subjects.len(), 1);
/// assert_eq!(subjects[0].name, "Renal");
/// assert_eq!(subjects[0].topics.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 入力の全シートを科目一覧に変換する
    ///
    /// 除外シート・データ行のないシート・トピックが1件もないシートは結果に含まれません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SubjectsData)` - シート順の科目一覧（空の場合もある）
    /// * `Err(SubjectsError)` - 評価値が整数に変換できない場合など
    pub fn convert<S: TabularSource>(&self, source: &mut S) -> Result<SubjectsData, SubjectsError> {
        Ok(self.convert_with_report(source)?.subjects)
    }

    /// 入力の全シートを変換し、スキップしたシートと行の記録も返す
    ///
    /// # 処理フロー
    ///
    /// 1. シート選択
    /// 2. 各シートについて処理（ループ）
    ///    - 除外シート名に一致 → スキップ
    ///    - データ行なし → スキップ
    ///    - `process_sheet`でトピックを抽出
    ///    - トピックなし → スキップ
    pub fn convert_with_report<S: TabularSource>(
        &self,
        source: &mut S,
    ) -> Result<ConversionReport, SubjectsError> {
        let sheet_names = self
            .config
            .sheet_selector
            .select(&source.sheet_names())
            .map_err(SubjectsError::Config)?;

        let mut report = ConversionReport::default();

        for sheet_name in sheet_names {
            if self.is_excluded(&sheet_name) {
                debug!(sheet = %sheet_name, "skipping excluded sheet");
                report.skipped_sheets.push(SkippedSheet {
                    sheet: sheet_name,
                    reason: SheetSkipReason::Excluded,
                });
                continue;
            }

            let grid = match source.sheet(&sheet_name) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!(sheet = %sheet_name, error = %e, "skipping unreadable sheet");
                    report.skipped_sheets.push(SkippedSheet {
                        sheet: sheet_name,
                        reason: SheetSkipReason::Unreadable(e.to_string()),
                    });
                    continue;
                }
            };

            if grid.is_empty() {
                debug!(sheet = %sheet_name, "skipping sheet without data rows");
                report.skipped_sheets.push(SkippedSheet {
                    sheet: sheet_name,
                    reason: SheetSkipReason::Empty,
                });
                continue;
            }

            let subject = self.process_sheet_into(&sheet_name, &grid, &mut report.skipped_rows)?;

            if subject.has_topics() {
                info!(
                    sheet = %sheet_name,
                    subject = %subject.name,
                    topics = subject.topics.len(),
                    "converted sheet"
                );
                report.subjects.push(subject);
            } else {
                info!(sheet = %sheet_name, "skipping sheet without complete topic rows");
                report.skipped_sheets.push(SkippedSheet {
                    sheet: sheet_name,
                    reason: SheetSkipReason::NoTopics,
                });
            }
        }

        Ok(report)
    }

    fn is_excluded(&self, sheet_name: &str) -> bool {
        sheet_name == EXPORT_SUMMARY_SHEET
            || self.config.excluded_sheets.iter().any(|name| name == sheet_name)
    }

    /// 1シート分のグリッドを科目に変換する
    ///
    /// * 科目名: 先頭行・先頭列のセル（前後の空白を除き、末尾の`:`を1つ取り除く）
    /// * トピック: 2行目以降で、名前と3つの評価値（列1〜3）がすべて揃った行
    ///
    /// 項目が欠けた行はエラーにせずスキップします。返される科目のトピックが空の場合もあります。
    ///
    /// # 引数
    ///
    /// * `sheet_name` - エラー表示用のシート名
    /// * `grid` - 1行以上のデータ行を持つグリッド
    ///
    /// # 戻り値
    ///
    /// * `Ok(Subject)` - 変換された科目
    /// * `Err(SubjectsError::MissingSubjectName)` - 先頭セルが空の場合
    /// * `Err(SubjectsError::InvalidRating)` - 評価値が整数に変換できない場合
    /// * `Err(SubjectsError::RatingOutOfRange)` - 範囲チェックに失敗した場合
    pub fn process_sheet(&self, sheet_name: &str, grid: &SheetGrid) -> Result<Subject, SubjectsError> {
        let mut skipped = Vec::new();
        self.process_sheet_into(sheet_name, grid, &mut skipped)
    }

    fn process_sheet_into(
        &self,
        sheet_name: &str,
        grid: &SheetGrid,
        skipped: &mut Vec<SkippedRow>,
    ) -> Result<Subject, SubjectsError> {
        let name = grid
            .cell(0, 0)
            .as_name()
            .map(|name| clean_subject_name(&name))
            .ok_or_else(|| SubjectsError::MissingSubjectName {
                sheet: sheet_name.to_string(),
            })?;

        let mut topics = Vec::new();

        for row in 1..grid.row_count() {
            let topic_name = grid.cell(row, 0).as_name();

            let mut missing: Vec<&'static str> = Vec::new();
            if topic_name.is_none() {
                missing.push("name");
            }
            for (offset, field) in RATING_FIELDS.iter().enumerate() {
                if grid.cell(row, offset + 1).is_empty() {
                    missing.push(*field);
                }
            }

            let topic_name = match topic_name {
                Some(topic_name) if missing.is_empty() => topic_name,
                _ => {
                    let skipped_row = SkippedRow {
                        sheet: sheet_name.to_string(),
                        row: grid.sheet_row_number(row),
                        missing,
                    };
                    if skipped_row.is_blank() {
                        debug!(sheet = %sheet_name, row = skipped_row.row, "skipping blank row");
                    } else {
                        warn!(
                            sheet = %sheet_name,
                            row = skipped_row.row,
                            missing = ?skipped_row.missing,
                            "skipping incomplete topic row"
                        );
                    }
                    skipped.push(skipped_row);
                    continue;
                }
            };

            let ratings = TopicRating::new(
                self.read_rating(sheet_name, grid, row, 1)?,
                self.read_rating(sheet_name, grid, row, 2)?,
                self.read_rating(sheet_name, grid, row, 3)?,
            );
            topics.push(Topic::new(topic_name, ratings));
        }

        Ok(Subject::new(name, topics))
    }

    /// 評価セルを整数として読み取る
    fn read_rating(
        &self,
        sheet_name: &str,
        grid: &SheetGrid,
        row: usize,
        col: usize,
    ) -> Result<i64, SubjectsError> {
        let cell = grid.cell(row, col);
        let cell_ref = || grid.sheet_coord(row, col).to_a1_notation();

        let value = cell.to_integer().ok_or_else(|| SubjectsError::InvalidRating {
            sheet: sheet_name.to_string(),
            cell: cell_ref(),
            value: cell.as_display_string(),
        })?;

        if let Some(bounds) = self.config.rating_bounds {
            if !bounds.contains(value) {
                return Err(SubjectsError::RatingOutOfRange {
                    sheet: sheet_name.to_string(),
                    cell: cell_ref(),
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }

        Ok(value)
    }

    /// スプレッドシートのバイト列を読み込み、科目一覧に変換する
    pub fn convert_reader<R: Read>(&self, input: R) -> Result<ConversionReport, SubjectsError> {
        let mut parser = self.open_workbook(input)?;
        self.convert_with_report(&mut parser)
    }

    /// 入力を設定に従って`WorkbookParser`として開く
    pub(crate) fn open_workbook<R: Read>(&self, input: R) -> Result<WorkbookParser, SubjectsError> {
        let security = SecurityConfig {
            max_input_file_size: self.config.max_input_size,
        };
        Ok(WorkbookParser::open_with_limits(input, &security)?.with_header_row(self.config.header_row))
    }

    /// 科目一覧を設定された出力フォーマットで書き出す
    ///
    /// 出力はバッファリングされ、最後にフラッシュされます。
    pub fn write_output<W: Write>(
        &self,
        subjects: &SubjectsData,
        output: W,
    ) -> Result<(), SubjectsError> {
        let formatter =
            OutputFormatter::from_format(self.config.output_format, &self.config.const_name);
        let mut writer = BufWriter::new(output);
        formatter.render(subjects, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// 入力のスプレッドシートを変換し、出力先に書き出す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxsubjects::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxsubjects::SubjectsError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let input = File::open("ratings.xlsx")?;
    /// let output = File::create("masterSubjects.ts")?;
    /// let report = converter.convert_to_writer(input, output)?;
    /// println!("{} subjects", report.subjects.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_writer<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<ConversionReport, SubjectsError> {
        let report = self.convert_reader(input)?;
        self.write_output(&report.subjects, output)?;
        Ok(report)
    }

    /// 入力のスプレッドシートを変換し、出力を文字列として返す
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, SubjectsError> {
        let mut buffer = Vec::new();
        self.convert_to_writer(input, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            SubjectsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

/// 科目名の整形（末尾の`:`を1つだけ取り除く）
fn clean_subject_name(name: &str) -> String {
    name.strip_suffix(':').unwrap_or(name).to_string()
}
