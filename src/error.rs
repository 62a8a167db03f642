//! 错误类型
//!
//! 每个关注点一个子枚举，统一汇总到 `AppError`

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 词库相关错误
    #[error("词库错误: {0}")]
    Store(#[from] StoreError),
    /// 试卷生成错误
    #[error("试卷错误: {0}")]
    Exam(#[from] ExamError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 文章加工错误
    #[error("文章错误: {0}")]
    Article(#[from] ArticleError),
    /// 命令解析错误
    #[error("命令错误: {0}")]
    Command(#[from] CommandError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 词库相关错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 单词已存在（不区分大小写）
    #[error("单词已存在: {word}")]
    DuplicateWord { word: String },
    /// 单词为空
    #[error("单词不能为空")]
    EmptyWord,
    /// 阻塞任务异常终止
    #[error("词库任务异常终止: {reason}")]
    TaskFailed { reason: String },
}

/// 试卷生成错误
#[derive(Debug, Error)]
pub enum ExamError {
    /// 抽样得到的单词数量不足
    #[error("单词数量不足 (当前: {available}, 最少: {required})")]
    InsufficientWords { available: usize, required: usize },
}

/// 文章加工错误
#[derive(Debug, Error)]
pub enum ArticleError {
    /// 原文没有段落
    #[error("文章没有段落: {title}")]
    NoParagraphs { title: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 返回内容无法解析
    #[error("无法解析LLM响应 ({reason}): {response}")]
    MalformedResponse { reason: String, response: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

/// 命令解析错误
#[derive(Debug, Error)]
pub enum CommandError {
    /// 数字无法解析
    #[error("无法解析数字: {value}")]
    InvalidNumber { value: String },
    /// 题目总数超出范围
    #[error("题目总数 {total} 超出范围 [{min}, {max}]")]
    TotalOutOfRange { total: usize, min: usize, max: usize },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建单词重复错误
    pub fn duplicate_word(word: impl Into<String>) -> Self {
        AppError::Store(StoreError::DuplicateWord { word: word.into() })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM响应解析错误
    pub fn malformed_response(reason: impl Into<String>, response: impl Into<String>) -> Self {
        AppError::Llm(LlmError::MalformedResponse {
            reason: reason.into(),
            response: response.into(),
        })
    }

    /// 是否为单词重复错误
    pub fn is_duplicate_word(&self) -> bool {
        matches!(self, AppError::Store(StoreError::DuplicateWord { .. }))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::File(FileError::TomlSerializeFailed(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::JsonSerializeFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
