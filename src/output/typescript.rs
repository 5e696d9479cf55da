//! TypeScript Module Output
//!
//! 科目一覧を、型定義・定数・デフォルトエクスポートからなるTypeScriptモジュールとして出力します。
//! 定数の値は2スペースインデントで整形したJSONです。

use std::io::Write;

use crate::error::SubjectsError;
use crate::model::SubjectsData;

/// 既定の定数名
pub const DEFAULT_CONST_NAME: &str = "masterSubjects";

const TYPE_DECLARATIONS: &str = "
export interface TopicRating {
  difficulty: number;
  clinicalImportance: number;
  examRelevance: number;
}

export interface Topic {
  name: string;
  ratings: TopicRating;
}

export interface Subject {
  name: string;
  topics: Topic[];
}

export type SubjectsData = Subject[];

";

const VALUE_MARKER: &str = ": SubjectsData = ";
const EXPORT_MARKER: &str = "\nexport default ";

/// TypeScriptモジュールのフォーマッター
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScriptModule {
    const_name: String,
}

impl Default for TypeScriptModule {
    fn default() -> Self {
        Self::new(DEFAULT_CONST_NAME)
    }
}

impl TypeScriptModule {
    pub fn new(const_name: impl Into<String>) -> Self {
        Self {
            const_name: const_name.into(),
        }
    }

    pub fn const_name(&self) -> &str {
        &self.const_name
    }

    /// モジュールを書き出す
    ///
    /// # 出力例
    ///
    /// ```text
    ///
    /// export interface TopicRating { ... }
    /// ...
    /// export type SubjectsData = Subject[];
    ///
    /// const masterSubjects: SubjectsData = [ ... ];
    ///
    /// export default masterSubjects;
    /// ```
    pub fn render<W: Write>(
        &self,
        subjects: &SubjectsData,
        writer: &mut W,
    ) -> Result<(), SubjectsError> {
        let json = serde_json::to_string_pretty(subjects)?;
        write!(
            writer,
            "{}const {name}{}{};\n\nexport default {name};\n",
            TYPE_DECLARATIONS,
            VALUE_MARKER,
            json,
            name = self.const_name
        )?;
        Ok(())
    }

    /// モジュールを文字列として生成する
    pub fn render_to_string(&self, subjects: &SubjectsData) -> Result<String, SubjectsError> {
        let mut buffer = Vec::new();
        self.render(subjects, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            SubjectsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

/// モジュールに埋め込まれた定数の値を読み戻す
///
/// `const <name>: SubjectsData = <JSON>;` の`<JSON>`部分を取り出してデシリアライズします。
///
/// # 使用例
///
/// ```rust
/// use xlsxsubjects::{parse_module, Subject, Topic, TopicRating, TypeScriptModule};
///
/// # fn main() -> Result<(), xlsxsubjects::SubjectsError> {
/// let subjects = vec![Subject::new(
///     "Renal",
///     vec![Topic::new("AKI", TopicRating::new(3, 4, 5))],
/// )];
/// let module = TypeScriptModule::default().render_to_string(&subjects)?;
/// assert_eq!(parse_module(&module)?, subjects);
/// # Ok(())
/// # }
/// ```
pub fn parse_module(source: &str) -> Result<SubjectsData, SubjectsError> {
    let start = source
        .find(VALUE_MARKER)
        .map(|idx| idx + VALUE_MARKER.len())
        .ok_or_else(|| {
            SubjectsError::InvalidModule("no `SubjectsData` constant found".to_string())
        })?;
    let end = source
        .rfind(EXPORT_MARKER)
        .filter(|&idx| idx >= start)
        .ok_or_else(|| SubjectsError::InvalidModule("no default export found".to_string()))?;

    let value = source[start..end].trim_end();
    let value = value.strip_suffix(';').ok_or_else(|| {
        SubjectsError::InvalidModule("constant declaration is not terminated".to_string())
    })?;

    Ok(serde_json::from_str(value)?)
}

/// 定数名に使用できない予約語（strictモードとモジュールで予約されるものを含む）
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// JavaScriptの識別子として有効かどうか（ASCIIの範囲のみ、予約語は無効）
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Subject, Topic, TopicRating};
    use pretty_assertions::assert_eq;

    fn renal() -> SubjectsData {
        vec![Subject::new(
            "Renal",
            vec![Topic::new("AKI", TopicRating::new(3, 4, 5))],
        )]
    }

    #[test]
    fn test_render_exact_layout() {
        let module = TypeScriptModule::default()
            .render_to_string(&renal())
            .unwrap();

        let expected = r#"
export interface TopicRating {
  difficulty: number;
  clinicalImportance: number;
  examRelevance: number;
}

export interface Topic {
  name: string;
  ratings: TopicRating;
}

export interface Subject {
  name: string;
  topics: Topic[];
}

export type SubjectsData = Subject[];

const masterSubjects: SubjectsData = [
  {
    "name": "Renal",
    "topics": [
      {
        "name": "AKI",
        "ratings": {
          "difficulty": 3,
          "clinicalImportance": 4,
          "examRelevance": 5
        }
      }
    ]
  }
];

export default masterSubjects;
"#;
        assert_eq!(module, expected);
    }

    #[test]
    fn test_render_empty_data() {
        let module = TypeScriptModule::default()
            .render_to_string(&Vec::new())
            .unwrap();
        assert!(module.contains("const masterSubjects: SubjectsData = [];\n"));
    }

    #[test]
    fn test_render_keeps_non_ascii() {
        let subjects = vec![Subject::new(
            "Ménière",
            vec![Topic::new("Vértigo", TopicRating::new(1, 2, 3))],
        )];
        let module = TypeScriptModule::default()
            .render_to_string(&subjects)
            .unwrap();
        assert!(module.contains("\"Ménière\""));
        assert_eq!(parse_module(&module).unwrap(), subjects);
    }

    #[test]
    fn test_parse_module_round_trip() {
        let module = TypeScriptModule::new("ratings")
            .render_to_string(&renal())
            .unwrap();
        assert_eq!(parse_module(&module).unwrap(), renal());
    }

    #[test]
    fn test_parse_module_missing_constant() {
        match parse_module("export default x;\n") {
            Err(SubjectsError::InvalidModule(msg)) => assert!(msg.contains("SubjectsData")),
            other => panic!("Expected InvalidModule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_module_missing_export() {
        let result = parse_module("const x: SubjectsData = [];\n");
        assert!(matches!(result, Err(SubjectsError::InvalidModule(_))));
    }

    #[test]
    fn test_parse_module_invalid_json() {
        let result = parse_module("const x: SubjectsData = [{];\n\nexport default x;\n");
        assert!(matches!(result, Err(SubjectsError::Json(_))));
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("masterSubjects"));
        assert!(is_valid_identifier("_data$1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1data"));
        assert!(!is_valid_identifier("master-subjects"));
        assert!(!is_valid_identifier("master subjects"));
    }

    #[test]
    fn test_reserved_words_are_not_identifiers() {
        for word in ["default", "class", "const", "enum", "let", "yield", "await"] {
            assert!(!is_valid_identifier(word), "{} accepted", word);
        }
        assert!(is_valid_identifier("defaults"));
        assert!(is_valid_identifier("Class"));
    }
}
