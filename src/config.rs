use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 词库文件（TOML）
    pub word_bank_file: String,
    /// 试卷输出目录
    pub exam_output_dir: String,
    /// 文章加工结果输出目录
    pub materials_output_dir: String,
    /// 消息频道文件
    pub channel_log_file: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 单条消息最大字符数
    pub message_chunk_size: usize,
    /// 随机种子（为空时使用系统熵）
    pub random_seed: Option<u64>,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_bank_file: "word_bank.toml".to_string(),
            exam_output_dir: "output".to_string(),
            materials_output_dir: "output".to_string(),
            channel_log_file: "channel.txt".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
            message_chunk_size: 2500,
            random_seed: None,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            word_bank_file: std::env::var("WORD_BANK_FILE").unwrap_or(default.word_bank_file),
            exam_output_dir: std::env::var("EXAM_OUTPUT_DIR").unwrap_or(default.exam_output_dir),
            materials_output_dir: std::env::var("MATERIALS_OUTPUT_DIR").unwrap_or(default.materials_output_dir),
            channel_log_file: std::env::var("CHANNEL_LOG_FILE").unwrap_or(default.channel_log_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            message_chunk_size: std::env::var("MESSAGE_CHUNK_SIZE").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.message_chunk_size),
            random_seed: std::env::var("RANDOM_SEED").ok().and_then(|v| v.parse().ok()).or(default.random_seed),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 机器人模式和文章加工需要 LLM 密钥
    pub fn validate_for_bot(&self) -> AppResult<()> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
