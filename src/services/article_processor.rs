//! 文章加工服务 - 业务能力层
//!
//! 把英文原文加工成每日学习资料：
//! - 选出最后几段译成韩文，得到英韩混排文章
//! - 从英文段落中提取表达
//! - 为每个韩文段落生成韩译英口译练习
//!
//! 单个 LLM 调用失败不会中断整篇文章的加工

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ArticleError};
use crate::models::article::{
    ArticleParagraph, Commentary, ContentStructure, DailyMaterials, Expression, MixedArticle,
    ParagraphKind, RawArticle, TranslationExercise,
};
use crate::services::llm_service::ArticleAssistant;

/// 译成韩文的段落数
pub const TRANSLATED_PARAGRAPHS: usize = 2;

/// 最多保留的表达个数
pub const MAX_EXPRESSIONS: usize = 10;

const EXERCISE_FALLBACK: &str = "Translation exercise could not be generated";

const READING_INSTRUCTION: &str = "영어 문단은 이해하며 읽고, 한글 문단은 영어로 번역해보세요.";

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 选出需要翻译的段落下标（从 0 开始）
///
/// 取最后 `count` 段；段落不足时全部翻译
pub fn select_translation_indices(paragraph_count: usize, count: usize) -> Vec<usize> {
    (paragraph_count.saturating_sub(count)..paragraph_count).collect()
}

/// 组装英韩混排文章
///
/// `translations` 以段落下标（从 0 开始）为键；有译文的段落标记为韩文
pub fn assemble_mixed_article(
    raw: &RawArticle,
    translations: &HashMap<usize, String>,
) -> MixedArticle {
    let paragraphs = raw
        .paragraphs
        .iter()
        .enumerate()
        .map(|(i, original)| match translations.get(&i) {
            Some(translated) => ArticleParagraph {
                paragraph_number: i + 1,
                kind: ParagraphKind::Korean,
                content: translated.clone(),
            },
            None => ArticleParagraph {
                paragraph_number: i + 1,
                kind: ParagraphKind::English,
                content: original.clone(),
            },
        })
        .collect();

    MixedArticle {
        title: raw.title.clone(),
        source: "New York Times".to_string(),
        topic: raw.topic.clone(),
        published_date: raw.published_date.clone(),
        paragraphs,
    }
}

/// 保存到磁盘的混排文章文档
#[derive(Serialize)]
struct MixedContentDocument<'a> {
    #[serde(flatten)]
    article: &'a MixedArticle,
    content_structure: ContentStructure,
    processing_date: String,
    reading_instruction: &'static str,
}

/// 保存得到的两个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMaterials {
    pub mixed_content_path: PathBuf,
    pub commentary_path: PathBuf,
}

/// 文章加工服务
pub struct ArticleProcessor<A> {
    assistant: A,
    output_dir: PathBuf,
}

impl<A: ArticleAssistant> ArticleProcessor<A> {
    pub fn new(assistant: A, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assistant,
            output_dir: output_dir.into(),
        }
    }

    /// 加工一篇原文
    ///
    /// # 错误
    /// 原文没有段落时返回 `ArticleError::NoParagraphs`，LLM 失败只记录警告
    pub async fn process(&self, raw: &RawArticle) -> AppResult<DailyMaterials> {
        if raw.paragraphs.is_empty() {
            return Err(ArticleError::NoParagraphs {
                title: raw.title.clone(),
            }
            .into());
        }

        info!("📝 开始加工文章: {}", raw.title);

        let indices = select_translation_indices(raw.paragraphs.len(), TRANSLATED_PARAGRAPHS);
        let mut translations = HashMap::new();
        for &i in &indices {
            let translated = match self
                .assistant
                .translate_paragraph(&raw.paragraphs[i], &raw.topic)
                .await
            {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    warn!("⚠️ 第 {} 段翻译失败，保留原文: {}", i + 1, e);
                    raw.paragraphs[i].clone()
                }
            };
            translations.insert(i, translated);
        }

        let article = assemble_mixed_article(raw, &translations);
        let expressions = self.expressions_for(&article).await;
        let translation_exercises = self.exercises_for(&article).await;

        info!(
            "✅ 文章加工完成 | 英文: {} | 韩文: {} | 表达: {} | 练习: {}",
            article.english_count(),
            article.korean_count(),
            expressions.len(),
            translation_exercises.len()
        );

        Ok(DailyMaterials {
            commentary: Some(Commentary {
                source_title: article.title.clone(),
                expressions,
                translation_exercises,
            }),
            article,
        })
    }

    async fn expressions_for(&self, article: &MixedArticle) -> Vec<Expression> {
        let english_text = article
            .paragraphs
            .iter()
            .filter(|p| p.kind == ParagraphKind::English)
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        if english_text.is_empty() {
            return Vec::new();
        }

        match self
            .assistant
            .extract_expressions(&english_text, &article.topic)
            .await
        {
            Ok(mut expressions) => {
                expressions.truncate(MAX_EXPRESSIONS);
                expressions
            }
            Err(e) => {
                warn!("⚠️ 表达提取失败: {}", e);
                Vec::new()
            }
        }
    }

    async fn exercises_for(&self, article: &MixedArticle) -> Vec<TranslationExercise> {
        let mut exercises = Vec::new();
        for paragraph in article
            .paragraphs
            .iter()
            .filter(|p| p.kind == ParagraphKind::Korean)
        {
            let exercise = match self
                .assistant
                .translation_exercise(&paragraph.content, paragraph.paragraph_number, &article.topic)
                .await
            {
                Ok(exercise) => exercise,
                Err(e) => {
                    warn!("⚠️ 第 {} 段口译练习生成失败: {}", paragraph.paragraph_number, e);
                    TranslationExercise {
                        paragraph_number: paragraph.paragraph_number,
                        korean_text: paragraph.content.clone(),
                        interpretation_approach: String::new(),
                        key_challenges: Vec::new(),
                        professional_translation: EXERCISE_FALLBACK.to_string(),
                        alternative_versions: Vec::new(),
                        interpretation_notes: Vec::new(),
                    }
                }
            };
            exercises.push(exercise);
        }
        exercises
    }

    /// 把资料保存为两个 JSON 文件
    ///
    /// 文件名：`mixed_content_<topic>_<ts>.json`、`commentary_<topic>_<ts>.json`
    pub async fn save(
        &self,
        materials: &DailyMaterials,
        processed_at: NaiveDateTime,
    ) -> AppResult<SavedMaterials> {
        let dir = self.output_dir.display().to_string();
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(&dir, e))?;

        let article = &materials.article;
        let timestamp = processed_at.format(FILE_TIMESTAMP_FORMAT).to_string();

        let document = MixedContentDocument {
            article,
            content_structure: article.content_structure(),
            processing_date: processed_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            reading_instruction: READING_INSTRUCTION,
        };
        let mixed_content_path = self
            .output_dir
            .join(format!("mixed_content_{}_{}.json", article.topic, timestamp));
        write_json(&mixed_content_path, &document).await?;

        let empty = Commentary {
            source_title: article.title.clone(),
            expressions: Vec::new(),
            translation_exercises: Vec::new(),
        };
        let commentary = materials.commentary.as_ref().unwrap_or(&empty);
        let commentary_path = self
            .output_dir
            .join(format!("commentary_{}_{}.json", article.topic, timestamp));
        write_json(&commentary_path, commentary).await?;

        info!(
            "💾 资料已保存: {} / {}",
            mixed_content_path.display(),
            commentary_path.display()
        );

        Ok(SavedMaterials {
            mixed_content_path,
            commentary_path,
        })
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    debug!("写入 {} | 长度: {}", path.display(), content.len());
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
