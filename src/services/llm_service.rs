//! LLM 服务 - 业务能力层
//!
//! 只负责"查询单词释义"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::article::{Expression, TranslationExercise};
use crate::models::word::WordRecord;

/// 同义词最多保留的个数
pub const MAX_SYNONYMS: usize = 3;

/// 单词释义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDefinition {
    pub word: String,
    pub korean_meaning: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub korean_example: String,
}

impl WordDefinition {
    /// 词库只保存 word / meaning / synonyms
    pub fn to_record(&self) -> WordRecord {
        WordRecord::new(&self.word, &self.korean_meaning, self.synonyms.clone())
    }
}

/// 释义提供者
pub trait DefinitionProvider: Send + Sync {
    /// 查询单词或短语的释义
    fn define(&self, word: &str) -> impl Future<Output = AppResult<WordDefinition>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 查询单词释义
/// - 解析 LLM 返回的 JSON
/// - 不写词库，不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `max_tokens`: 最大输出 token 数
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        max_tokens: u32,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let api_failed = |e: OpenAIError| AppError::llm_api_failed(&self.model_name, e);

        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(api_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(api_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(max_tokens)
            .build()
            .map_err(api_failed)?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            api_failed(e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    /// 查询单词释义
    pub async fn lookup_word(&self, word: &str) -> AppResult<WordDefinition> {
        let prompt = build_definition_prompt(word);
        let response = self.send_to_llm(&prompt, None, 1000).await?;

        let definition = parse_definition_response(&response).inspect_err(|e| {
            warn!("释义解析失败: {}", e);
        })?;

        info!("✓ 获取到单词释义: {}", definition.word);
        Ok(definition)
    }
}

impl DefinitionProvider for LlmService {
    async fn define(&self, word: &str) -> AppResult<WordDefinition> {
        self.lookup_word(word).await
    }
}

/// 构建释义查询 prompt
fn build_definition_prompt(word: &str) -> String {
    format!(
        r#"
다음 영어 단어/표현에 대해 정확한 정보를 JSON 형태로 제공해주세요:

단어: "{}"

다음 형식으로 응답해주세요:
{{
    "word": "단어 원형",
    "korean_meaning": "주요 한글 의미",
    "synonyms": ["동의어1", "동의어2", "동의어3"],
    "example": "영어 예문",
    "korean_example": "예문 한글 번역"
}}

주의사항:
- 가장 일반적이고 중요한 의미를 제공하세요
- 동의어는 실용적인 것들로 최대 3개까지
- 예문은 실생활에서 사용 가능한 자연스러운 문장으로
- 구문의 경우 전체를 하나의 단위로 처리
- JSON 형식을 정확히 지켜주세요
"#,
        word
    )
}

/// 取出响应中的 JSON 片段
///
/// 先去掉 ```json / ``` 代码块标记，再截取第一个 `open` 到最后一个 `close`
fn extract_json_span(content: &str, open: char, close: char) -> Option<&str> {
    let body = if let Some((_, after)) = content.split_once("```json") {
        after.split("```").next().unwrap_or(after)
    } else if let Some((_, after)) = content.split_once("```") {
        after.split("```").next().unwrap_or(after)
    } else {
        content
    };

    let start = body.find(open)?;
    let end = body.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

#[derive(Deserialize)]
struct RawDefinition {
    word: String,
    korean_meaning: String,
    #[serde(default)]
    synonyms: Option<Vec<String>>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    korean_example: Option<String>,
}

/// 解析释义响应
///
/// 缺少 `word` / `korean_meaning`、`word` 为空或找不到 JSON 对象时返回 `MalformedResponse`
pub fn parse_definition_response(content: &str) -> AppResult<WordDefinition> {
    let json = extract_json_span(content, '{', '}')
        .ok_or_else(|| AppError::malformed_response("响应中没有 JSON 对象", content))?;

    let raw: RawDefinition = serde_json::from_str(json)
        .map_err(|e| AppError::malformed_response(e.to_string(), content))?;

    let word = raw.word.trim().to_string();
    if word.is_empty() {
        return Err(AppError::malformed_response("word 字段为空", content));
    }

    let synonyms = raw
        .synonyms
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SYNONYMS)
        .collect();

    Ok(WordDefinition {
        word,
        korean_meaning: raw.korean_meaning.trim().to_string(),
        synonyms,
        example: raw.example.unwrap_or_default(),
        korean_example: raw.korean_example.unwrap_or_default(),
    })
}

// ========== 文章加工 ==========

/// 文章加工助手
pub trait ArticleAssistant: Send + Sync {
    /// 把英文段落译成韩文
    fn translate_paragraph(
        &self,
        paragraph: &str,
        topic: &str,
    ) -> impl Future<Output = AppResult<String>> + Send;

    /// 从英文文本中提取重要表达
    fn extract_expressions(
        &self,
        text: &str,
        topic: &str,
    ) -> impl Future<Output = AppResult<Vec<Expression>>> + Send;

    /// 为一段韩文生成韩译英口译练习
    fn translation_exercise(
        &self,
        korean_text: &str,
        paragraph_number: usize,
        topic: &str,
    ) -> impl Future<Output = AppResult<TranslationExercise>> + Send;
}

impl ArticleAssistant for LlmService {
    async fn translate_paragraph(&self, paragraph: &str, topic: &str) -> AppResult<String> {
        self.send_to_llm(&build_translation_prompt(paragraph, topic), None, 500)
            .await
    }

    async fn extract_expressions(&self, text: &str, topic: &str) -> AppResult<Vec<Expression>> {
        let response = self
            .send_to_llm(&build_expressions_prompt(text, topic), None, 2000)
            .await?;
        parse_expressions_response(&response)
    }

    async fn translation_exercise(
        &self,
        korean_text: &str,
        paragraph_number: usize,
        topic: &str,
    ) -> AppResult<TranslationExercise> {
        let prompt = build_exercise_prompt(korean_text, paragraph_number, topic);
        let response = self.send_to_llm(&prompt, None, 1000).await?;
        parse_exercise_response(&response, paragraph_number, korean_text)
    }
}

fn build_translation_prompt(paragraph: &str, topic: &str) -> String {
    format!(
        r#"
다음 영어 문단을 자연스럽고 정확한 한국어로 번역해주세요.

주제: {}
원문: {}

번역할 때 고려사항:
- 자연스러운 한국어 표현 사용
- 전문 용어는 적절한 한국어 용어로 번역
- 문맥과 뉘앙스 유지
- 읽기 쉬운 문장 구조로 번역

번역문만 제공해주세요.
"#,
        topic, paragraph
    )
}

fn build_expressions_prompt(text: &str, topic: &str) -> String {
    format!(
        r#"
다음 영어 텍스트에서 중요하고 유용한 표현 10개를 추출하여 JSON 배열로 제공해주세요.

주제: {}
텍스트: {}

각 표현에 대해 다음 정보를 포함해주세요:
{{
    "expression": "추출된 표현",
    "korean_meaning": "한글 의미",
    "synonyms": ["동의어1", "동의어2", "동의어3"],
    "context": "원문에서의 사용 예"
}}

응답은 JSON 배열 형태로만 제공해주세요.
"#,
        topic, text
    )
}

fn build_exercise_prompt(korean_text: &str, paragraph_number: usize, topic: &str) -> String {
    // 原文直接嵌入 JSON 模板，需要转义
    let escaped = serde_json::Value::String(korean_text.to_string()).to_string();
    format!(
        r#"
다음 한글 문장을 영어로 번역하는 통역 연습을 만들어주세요.

주제: {}
한글 문장: {}

다음 형식으로 JSON 응답해주세요:
{{
    "paragraph_number": {},
    "korean_text": {},
    "interpretation_approach": "통역 관점에서의 번역 접근법",
    "key_challenges": ["번역 시 주의할 점1", "주의할 점2", "주의할 점3"],
    "professional_translation": "모범 번역문",
    "alternative_versions": ["대안 번역1", "대안 번역2"],
    "interpretation_notes": ["통역 팁1", "통역 팁2", "통역 팁3"]
}}
"#,
        topic, korean_text, paragraph_number, escaped
    )
}

/// 解析表达提取响应（JSON 数组）
///
/// 找不到数组或格式错误时返回 `MalformedResponse`
pub fn parse_expressions_response(content: &str) -> AppResult<Vec<Expression>> {
    let json = extract_json_span(content, '[', ']')
        .ok_or_else(|| AppError::malformed_response("响应中没有 JSON 数组", content))?;

    serde_json::from_str(json).map_err(|e| AppError::malformed_response(e.to_string(), content))
}

#[derive(Deserialize)]
struct RawExercise {
    #[serde(default)]
    interpretation_approach: String,
    #[serde(default)]
    key_challenges: Vec<String>,
    #[serde(default)]
    professional_translation: String,
    #[serde(default)]
    alternative_versions: Vec<String>,
    #[serde(default)]
    interpretation_notes: Vec<String>,
}

/// 解析口译练习响应
///
/// 段落编号和韩文原文始终使用调用方传入的值
pub fn parse_exercise_response(
    content: &str,
    paragraph_number: usize,
    korean_text: &str,
) -> AppResult<TranslationExercise> {
    let json = extract_json_span(content, '{', '}')
        .ok_or_else(|| AppError::malformed_response("响应中没有 JSON 对象", content))?;

    let raw: RawExercise = serde_json::from_str(json)
        .map_err(|e| AppError::malformed_response(e.to_string(), content))?;

    Ok(TranslationExercise {
        paragraph_number,
        korean_text: korean_text.to_string(),
        interpretation_approach: raw.interpretation_approach,
        key_challenges: raw.key_challenges,
        professional_translation: raw.professional_translation,
        alternative_versions: raw.alternative_versions,
        interpretation_notes: raw.interpretation_notes,
    })
}
