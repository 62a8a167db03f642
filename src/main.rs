use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing::error;

use vocab_exam_bot::utils::logging;
use vocab_exam_bot::{App, Config};

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// 交互式单词机器人
    Bot,
    /// 推送每日文章和解析
    Notify,
    /// 先推送，再启动机器人
    Both,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Bot => "bot",
            Mode::Notify => "notify",
            Mode::Both => "both",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "vocab_exam_bot", about = "英语单词机器人和试卷生成器")]
struct Cli {
    /// 运行模式
    #[arg(long, value_enum, default_value = "bot")]
    mode: Mode,

    /// 每日资料 TOML 文件（notify / both 模式）
    #[arg(long, conflicts_with = "article")]
    materials: Option<PathBuf>,

    /// 英文原文 TOML 文件，先加工再推送（notify / both 模式）
    #[arg(long)]
    article: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::init_log_file(&config.output_log_file)?;
    logging::log_startup(cli.mode.as_str(), &config.word_bank_file);

    let app = App::new(config);

    if matches!(cli.mode, Mode::Notify | Mode::Both) {
        let report = match (cli.materials.as_deref(), cli.article.as_deref()) {
            (Some(materials), _) => app.run_notify(materials).await?,
            (None, Some(article)) => app.run_pipeline(article).await?,
            (None, None) => bail!("notify 模式需要 --materials <path> 或 --article <path>"),
        };
        if !report.errors.is_empty() {
            error!("⚠️ 每日资料推送存在错误");
        }
    }

    if matches!(cli.mode, Mode::Bot | Mode::Both) {
        app.run_bot().await?;
    }

    Ok(())
}
