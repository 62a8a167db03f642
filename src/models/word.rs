//! 单词记录

use serde::{Deserialize, Serialize};

/// 同义词在持久化行中的分隔符
pub const SYNONYM_SEPARATOR: &str = ", ";

/// 词库中的一条单词记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// 单词或短语（保留原始大小写）
    pub word: String,
    /// 母语释义
    pub meaning: String,
    /// 同义词（可以为空）
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl WordRecord {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            synonyms,
        }
    }

    /// 是否带有同义词
    pub fn has_synonyms(&self) -> bool {
        !self.synonyms.is_empty()
    }

    /// 同义词的持久化形式，例如 `"big, large"`
    pub fn synonyms_joined(&self) -> String {
        self.synonyms.join(SYNONYM_SEPARATOR)
    }
}

/// 不区分大小写的单词比较
pub fn same_word(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// 解析持久化的同义词字符串，空字符串得到空列表
pub fn split_synonyms(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(SYNONYM_SEPARATOR).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_round_trip() {
        let record = WordRecord::new(
            "big",
            "큰",
            vec!["large".to_string(), "huge".to_string()],
        );
        assert_eq!(record.synonyms_joined(), "large, huge");
        assert_eq!(split_synonyms(&record.synonyms_joined()), record.synonyms);
    }

    #[test]
    fn test_empty_synonyms() {
        let record = WordRecord::new("alone", "혼자", Vec::new());
        assert_eq!(record.synonyms_joined(), "");
        assert!(split_synonyms("").is_empty());
        assert!(!record.has_synonyms());
    }

    #[test]
    fn test_same_word_ignores_case() {
        assert!(same_word("Take care of", "take CARE of"));
        assert!(!same_word("Take care of", "take care"));
    }
}
