//! 应用主结构 - 编排层
//!
//! ## 职责
//!
//! 1. **机器人模式**：逐行读取标准输入，分发命令，把回复写到标准输出
//! 2. **推送模式**：加载每日资料，发送文章和解析到消息频道
//! 3. **加工模式**：把英文原文加工成每日资料，保存后推送
//! 4. **资源管理**：持有配置，按模式创建词库、LLM 服务和写入器

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::TomlBankFile;
use chrono::Local;

use crate::models::{load_daily_materials, load_raw_article, DailyMaterials};
use crate::orchestrator::bot::BotHandler;
use crate::services::{
    ArticleAssistant, ArticleNotifier, ArticleProcessor, ChannelWriter, ExamWriter, LlmService, NotifyReport, WordStore,
};
use crate::utils::logging;
use crate::workflow::{ExamFlow, LookupFlow};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 创建使用文件词库和 LLM 的命令分发器
    pub fn build_bot(&self) -> Result<BotHandler<LlmService, TomlBankFile>> {
        self.config.validate_for_bot()?;

        let store = Arc::new(WordStore::new(TomlBankFile::new(
            &self.config.word_bank_file,
        )));
        let exam_flow = ExamFlow::new(
            store.clone(),
            ExamWriter::new(&self.config.exam_output_dir),
            self.config.random_seed,
        );
        let lookup_flow = LookupFlow::new(LlmService::new(&self.config), store);

        Ok(BotHandler::new(exam_flow, lookup_flow))
    }

    /// 机器人模式：逐行处理标准输入，直到 EOF
    pub async fn run_bot(&self) -> Result<()> {
        let handler = self.build_bot()?;
        info!("🤖 机器人已启动，等待命令 (输入 `도움말` 查看帮助)");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut handled = 0usize;

        while let Some(line) = lines.next_line().await? {
            let replies = handler.handle(&line).await;
            if replies.is_empty() {
                continue;
            }
            handled += 1;
            for reply in replies {
                println!("{}", reply);
            }
        }

        info!("输入结束，共处理 {} 条命令", handled);
        Ok(())
    }

    /// 推送模式：发送每日文章和解析
    pub async fn run_notify(&self, materials_path: &Path) -> Result<NotifyReport> {
        info!("\n📁 正在加载每日资料: {}", materials_path.display());
        let materials = load_daily_materials(materials_path).await?;

        if materials.commentary.is_none() {
            warn!("⚠️ 资料中没有解析部分，只发送文章");
        }

        Ok(self.notify(&materials).await)
    }

    /// 加工模式：加工英文原文，保存资料后推送
    pub async fn run_pipeline(&self, article_path: &Path) -> Result<NotifyReport> {
        self.config.validate_for_bot()?;
        self.run_pipeline_with(LlmService::new(&self.config), article_path)
            .await
    }

    async fn run_pipeline_with<A: ArticleAssistant>(
        &self,
        assistant: A,
        article_path: &Path,
    ) -> Result<NotifyReport> {
        info!("\n📁 正在加载原文: {}", article_path.display());
        let raw = load_raw_article(article_path).await?;

        let processor = ArticleProcessor::new(assistant, &self.config.materials_output_dir);
        let materials = processor.process(&raw).await?;
        processor.save(&materials, Local::now().naive_local()).await?;

        Ok(self.notify(&materials).await)
    }

    async fn notify(&self, materials: &DailyMaterials) -> NotifyReport {
        let notifier = ArticleNotifier::new(
            ChannelWriter::new(&self.config.channel_log_file),
            self.config.message_chunk_size,
        );
        let report = notifier.send_daily_materials(materials).await;

        logging::log_notify_result(report.article_sent, report.commentary_sent, &report.errors);
        info!("\n消息已写入: {}", self.config.channel_log_file);

        report
    }
}
