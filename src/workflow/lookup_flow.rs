//! 单词查询流程 - 流程层
//!
//! 流程顺序：
//! 1. 释义提供者查询
//! 2. 不存在时写入词库（查重和写入是原子的）
//! 3. 生成回复

use std::sync::Arc;

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::BankBackend;
use crate::services::{DefinitionProvider, WordDefinition, WordStore};

/// 查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// 新单词，已写入词库
    Saved(WordDefinition),
    /// 词库中已有该单词（不区分大小写）
    AlreadySaved(WordDefinition),
}

impl LookupOutcome {
    pub fn definition(&self) -> &WordDefinition {
        match self {
            LookupOutcome::Saved(definition) | LookupOutcome::AlreadySaved(definition) => {
                definition
            }
        }
    }
}

/// 单词查询流程
pub struct LookupFlow<P: DefinitionProvider, B: BankBackend> {
    provider: P,
    store: Arc<WordStore<B>>,
}

impl<P: DefinitionProvider, B: BankBackend + 'static> LookupFlow<P, B> {
    pub fn new(provider: P, store: Arc<WordStore<B>>) -> Self {
        Self { provider, store }
    }

    /// 查询并保存
    ///
    /// 重复单词不是错误，返回 `AlreadySaved`
    pub async fn run(&self, word: &str) -> AppResult<LookupOutcome> {
        let definition = self.provider.define(word).await?;

        match self.store.append_blocking(definition.to_record()).await {
            Ok(()) => Ok(LookupOutcome::Saved(definition)),
            Err(e) if e.is_duplicate_word() => {
                info!("单词已在词库中: {}", definition.word);
                Ok(LookupOutcome::AlreadySaved(definition))
            }
            Err(e) => Err(e),
        }
    }
}

/// 生成查询回复
pub fn format_reply(outcome: &LookupOutcome) -> String {
    let definition = outcome.definition();

    let mut reply = format!("📚 *{}*\n", definition.word);
    reply.push_str(&format!("🇰🇷 *뜻:* {}\n", definition.korean_meaning));

    if !definition.synonyms.is_empty() {
        reply.push_str(&format!("🔄 *동의어:* {}\n", definition.synonyms.join(", ")));
    }

    if !definition.example.is_empty() {
        reply.push_str(&format!("\n💬 *예문:*\n> {}\n", definition.example));
        if !definition.korean_example.is_empty() {
            reply.push_str(&format!("> _{}_\n", definition.korean_example));
        }
    }

    reply.push('\n');
    reply.push_str(&"=".repeat(30));
    reply.push('\n');

    match outcome {
        LookupOutcome::Saved(_) => reply.push_str("✅ *단어장에 저장 완료!*"),
        LookupOutcome::AlreadySaved(_) => reply.push_str("ℹ️ *이미 저장된 단어입니다.*"),
    }

    reply
}
