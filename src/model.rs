//! Subject Model
//!
//! 変換結果のデータモデル。JSON表現（キー名と順序）は出力先のTypeScript型と一致させる。

use serde::{Deserialize, Serialize};

/// トピックの3つの評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRating {
    pub difficulty: i64,
    pub clinical_importance: i64,
    pub exam_relevance: i64,
}

impl TopicRating {
    pub fn new(difficulty: i64, clinical_importance: i64, exam_relevance: i64) -> Self {
        Self {
            difficulty,
            clinical_importance,
            exam_relevance,
        }
    }
}

/// 科目に属するトピック
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub ratings: TopicRating,
}

impl Topic {
    pub fn new(name: impl Into<String>, ratings: TopicRating) -> Self {
        Self {
            name: name.into(),
            ratings,
        }
    }
}

/// 科目（1シートに対応）
///
/// トピックは行の順序を保持します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub topics: Vec<Topic>,
}

impl Subject {
    pub fn new(name: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            name: name.into(),
            topics,
        }
    }

    /// トピックがあるかどうか（トピックのない科目は出力されない）
    pub fn has_topics(&self) -> bool {
        !self.topics.is_empty()
    }
}

/// 変換結果（シート順の科目一覧）
pub type SubjectsData = Vec<Subject>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_topic_serializes_in_camel_case() {
        let topic = Topic::new("AKI", TopicRating::new(3, 4, 5));
        let value = serde_json::to_value(&topic).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "AKI",
                "ratings": {
                    "difficulty": 3,
                    "clinicalImportance": 4,
                    "examRelevance": 5
                }
            })
        );
    }

    #[test]
    fn test_field_order_matches_typescript_interfaces() {
        let subject = Subject::new("Renal", vec![Topic::new("AKI", TopicRating::new(3, 4, 5))]);
        let text = serde_json::to_string(&subject).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Renal","topics":[{"name":"AKI","ratings":{"difficulty":3,"clinicalImportance":4,"examRelevance":5}}]}"#
        );
    }

    #[test]
    fn test_deserialize_subjects_data() {
        let data: SubjectsData = serde_json::from_value(json!([
            {
                "name": "Cardiology",
                "topics": [
                    {
                        "name": "Heart failure",
                        "ratings": {"difficulty": 7, "clinicalImportance": 9, "examRelevance": 8}
                    }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].topics[0].ratings, TopicRating::new(7, 9, 8));
    }

    #[test]
    fn test_has_topics() {
        assert!(!Subject::new("Empty", vec![]).has_topics());
        assert!(Subject::new("One", vec![Topic::new("x", TopicRating::new(1, 1, 1))]).has_topics());
    }
}
