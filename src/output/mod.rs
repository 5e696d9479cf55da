//! Output Format Module
//!
//! 変換結果の出力フォーマットを抽象化するモジュール。

mod typescript;

use crate::error::SubjectsError;
use crate::model::SubjectsData;
use std::io::Write;

pub use typescript::{is_valid_identifier, parse_module, TypeScriptModule, DEFAULT_CONST_NAME};

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 型定義と定数を含むTypeScriptモジュール（デフォルト）
    #[default]
    TypeScript,

    /// 科目一覧のJSON配列のみ
    Json,
}

/// 出力フォーマッター
///
/// 各出力フォーマットをenumとして表現します。
#[derive(Debug, Clone)]
pub(crate) enum OutputFormatter {
    TypeScript(TypeScriptModule),
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat, const_name: &str) -> Self {
        match format {
            OutputFormat::TypeScript => OutputFormatter::TypeScript(TypeScriptModule::new(const_name)),
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// 科目一覧を指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        subjects: &SubjectsData,
        writer: &mut W,
    ) -> Result<(), SubjectsError> {
        match self {
            OutputFormatter::TypeScript(module) => module.render(subjects, writer),
            OutputFormatter::Json => {
                serde_json::to_writer_pretty(&mut *writer, subjects)?;
                writeln!(writer)?;
                Ok(())
            }
        }
    }
}
