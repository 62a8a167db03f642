//! 每日文章学习资料

use serde::{Deserialize, Serialize};

/// 段落语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphKind {
    /// 原文段落
    English,
    /// 已翻译为母语的段落（需要学习者译回英文）
    Korean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleParagraph {
    pub paragraph_number: usize,
    #[serde(rename = "type")]
    pub kind: ParagraphKind,
    pub content: String,
}

/// 英韩混排文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixedArticle {
    pub title: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub topic: String,
    #[serde(default)]
    pub published_date: String,
    pub paragraphs: Vec<ArticleParagraph>,
}

fn default_source() -> String {
    "New York Times".to_string()
}

impl MixedArticle {
    pub fn english_count(&self) -> usize {
        self.count(ParagraphKind::English)
    }

    pub fn korean_count(&self) -> usize {
        self.count(ParagraphKind::Korean)
    }

    fn count(&self, kind: ParagraphKind) -> usize {
        self.paragraphs.iter().filter(|p| p.kind == kind).count()
    }

    /// 段落构成统计
    pub fn content_structure(&self) -> ContentStructure {
        ContentStructure {
            total_paragraphs: self.paragraphs.len(),
            english_paragraphs: self.english_count(),
            korean_paragraphs: self.korean_count(),
            translation_indices: self
                .paragraphs
                .iter()
                .filter(|p| p.kind == ParagraphKind::Korean)
                .map(|p| p.paragraph_number)
                .collect(),
        }
    }
}

/// 段落构成统计，`translation_indices` 为译成韩文的段落编号（从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStructure {
    pub total_paragraphs: usize,
    pub english_paragraphs: usize,
    pub korean_paragraphs: usize,
    pub translation_indices: Vec<usize>,
}

/// 待加工的英文原文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub topic: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub link: String,
    /// 按顺序排列的英文段落
    pub paragraphs: Vec<String>,
}

/// 从原文中提取的表达
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub expression: String,
    pub korean_meaning: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// 原文中的例句
    #[serde(default)]
    pub context: String,
}

/// 韩译英口译练习
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationExercise {
    pub paragraph_number: usize,
    pub korean_text: String,
    #[serde(default)]
    pub interpretation_approach: String,
    #[serde(default)]
    pub key_challenges: Vec<String>,
    #[serde(default)]
    pub professional_translation: String,
    #[serde(default)]
    pub alternative_versions: Vec<String>,
    #[serde(default)]
    pub interpretation_notes: Vec<String>,
}

/// 表达解析资料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commentary {
    pub source_title: String,
    #[serde(default)]
    pub expressions: Vec<Expression>,
    #[serde(default)]
    pub translation_exercises: Vec<TranslationExercise>,
}

/// 一天的学习资料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMaterials {
    pub article: MixedArticle,
    #[serde(default)]
    pub commentary: Option<Commentary>,
}
