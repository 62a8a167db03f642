//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用主结构
//! - 持有配置，按运行模式创建服务
//! - 机器人模式：逐行读取命令
//! - 推送模式：发送每日文章和解析
//!
//! ### `bot` - 命令分发器
//! - 解析一行文本并分发给对应流程
//! - 把流程结果和错误转换成回复消息
//!
//! ## 层次关系
//!
//! ```text
//! app (运行模式)
//!     ↓
//! bot (处理一行命令)
//!     ↓
//! workflow::{ExamFlow, LookupFlow} (处理单个请求)
//!     ↓
//! services (能力层：word_store / llm / exam_writer / notifier)
//!     ↓
//! infrastructure (基础设施：BankBackend)
//! ```

pub mod app;
pub mod bot;

pub use app::App;
pub use bot::BotHandler;
