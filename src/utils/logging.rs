//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use std::fs;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n单词机器人运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 运行模式
/// - `word_bank_file`: 词库文件
pub fn log_startup(mode: &str, word_bank_file: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 运行模式: {}", mode);
    info!("📚 词库文件: {}", word_bank_file);
    info!("{}", "=".repeat(60));
}

/// 记录每日资料发送结果
///
/// # 参数
/// - `article_sent`: 文章是否发送成功
/// - `commentary_sent`: 解析是否发送成功
/// - `errors`: 错误列表
pub fn log_notify_result(article_sent: bool, commentary_sent: bool, errors: &[String]) {
    info!("\n{}", "─".repeat(60));
    info!("📰 文章发送: {}", if article_sent { "成功" } else { "失败" });
    info!("📚 解析发送: {}", if commentary_sent { "成功" } else { "失败" });
    for error in errors {
        info!("❌ {}", error);
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 超过 `max_len` 时保留前 `max_len` 个字符并追加 `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
