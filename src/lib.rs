//! # Vocab Exam Bot
//!
//! 英语单词机器人：查询并保存单词，从词库生成五部分试卷，推送每日英韩混排文章
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 词库存储后端，只暴露"读取全部 / 追加一行"
//! - `TomlBankFile` - 文件词库
//! - `MemoryBank` - 内存词库
//!
//! ### ② 核心算法（Exam）
//! - `exam/allocator` - 把抽样结果分配到五个部分
//! - `exam/synthesizer` - 渲染试卷和答案
//!
//! ### ③ 业务能力层（Services）
//! - `WordStore` - 查重追加和随机抽样
//! - `LlmService` - 单词释义查询和文章加工助手
//! - `ArticleProcessor` - 原文 → 英韩混排文章 + 表达解析 + 口译练习
//! - `ExamWriter` - 试卷文件交付
//! - `ChannelWriter` / `ArticleNotifier` - 分段消息推送
//!
//! ### ④ 流程层（Workflow）
//! - `command` - 命令解析
//! - `ExamFlow` - 抽样 → 分配 → 渲染 → 交付
//! - `LookupFlow` - 查询 → 保存 → 回复
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/app` - 运行模式和资源管理
//! - `orchestrator/bot` - 命令分发和回复
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod exam;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use exam::{allocate, render, Allocation, ExamDocuments, ExamSection};
pub use infrastructure::{BankBackend, MemoryBank, TomlBankFile};
pub use models::{SectionTargets, WordRecord};
pub use orchestrator::{App, BotHandler};
pub use services::{ArticleAssistant, ArticleProcessor, DefinitionProvider, WordDefinition, WordStore};
pub use utils::chunk_text;
pub use workflow::{parse_command, Command, ExamFlow, LookupFlow};
