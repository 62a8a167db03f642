//! 每日资料推送服务 - 业务能力层
//!
//! 把混排文章和表达解析格式化为消息，长文章按频道长度限制分段发送

use tracing::{error, info};

use crate::models::article::{Commentary, DailyMaterials, MixedArticle, ParagraphKind};
use crate::services::channel_writer::MessageChannel;
use crate::utils::chunker::chunk_text;
use crate::utils::logging::truncate_text;

/// 解析消息最多包含的表达数
pub const MAX_EXPRESSIONS: usize = 10;

const NUMBER_EMOJIS: [&str; MAX_EXPRESSIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// 推送结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotifyReport {
    pub article_sent: bool,
    pub commentary_sent: bool,
    pub errors: Vec<String>,
}

/// 每日资料推送服务
pub struct ArticleNotifier<C: MessageChannel> {
    channel: C,
    chunk_size: usize,
}

impl<C: MessageChannel> ArticleNotifier<C> {
    pub fn new(channel: C, chunk_size: usize) -> Self {
        Self {
            channel,
            chunk_size,
        }
    }

    /// 发送文章和解析
    ///
    /// 两部分互不影响：文章发送失败时仍会尝试发送解析
    pub async fn send_daily_materials(&self, materials: &DailyMaterials) -> NotifyReport {
        let mut report = NotifyReport::default();

        // 1. 混排文章
        let messages = format_article_messages(&materials.article, self.chunk_size);
        match self.post_all(&messages).await {
            Ok(()) => {
                report.article_sent = true;
                info!("✓ 文章发送完成 ({} 条消息)", messages.len());
            }
            Err(e) => {
                error!("文章发送失败: {}", e);
                report.errors.push(format!("문단 콘텐츠 전송 실패: {}", e));
            }
        }

        // 2. 表达解析
        if let Some(commentary) = &materials.commentary {
            let message = format_commentary_message(commentary);
            match self.channel.post(&message).await {
                Ok(()) => {
                    report.commentary_sent = true;
                    info!("✓ 解析发送完成");
                }
                Err(e) => {
                    error!("解析发送失败: {}", e);
                    report.errors.push(format!("해설 자료 전송 실패: {}", e));
                }
            }
        }

        report
    }

    async fn post_all(&self, messages: &[String]) -> crate::error::AppResult<()> {
        for message in messages {
            self.channel.post(message).await?;
        }
        Ok(())
    }
}

/// Python `str.title()` 风格的首字母大写
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// 格式化混排文章并按 `chunk_size` 分段
pub fn format_article_messages(article: &MixedArticle, chunk_size: usize) -> Vec<String> {
    let published_date: String = article.published_date.chars().take(10).collect();

    let mut text = format!(
        "📰 *오늘의 영어 기사* ({})\n*제목:* {}\n*출처:* {} | *날짜:* {}\n\n",
        title_case(&article.topic),
        article.title,
        article.source,
        published_date
    );

    text.push_str(&"=".repeat(50));
    text.push_str("\n\n");

    for paragraph in &article.paragraphs {
        let label = match paragraph.kind {
            ParagraphKind::Korean => format!("*🇰🇷 문단 {} (한글)*", paragraph.paragraph_number),
            ParagraphKind::English => format!("*📖 문단 {} (영어)*", paragraph.paragraph_number),
        };
        text.push_str(&format!("{}\n{}\n\n", label, paragraph.content));
    }

    text.push_str(&"=".repeat(50));
    text.push_str(&format!(
        "\n💡 *학습 팁:* 영어 문단은 이해하며 읽고, 한글 문단은 영어로 번역해보세요!\n📊 *구성:* 총 {}문단 중 영어 {}개, 한글 {}개",
        article.paragraphs.len(),
        article.english_count(),
        article.korean_count()
    ));

    chunk_text(&text, chunk_size)
}

/// 格式化表达解析（单条消息）
pub fn format_commentary_message(commentary: &Commentary) -> String {
    let mut text = format!(
        "📚 *오늘의 영어 표현 해설*\n*출처:* {}\n\n*🎯 원문에서 추출한 핵심 표현*\n\n",
        commentary.source_title
    );

    for (expression, emoji) in commentary.expressions.iter().zip(NUMBER_EMOJIS) {
        text.push_str(&format!("*{} {}*\n", emoji, expression.expression));
        text.push_str(&format!("🇰🇷 *뜻:* {}\n", expression.korean_meaning));

        if !expression.synonyms.is_empty() {
            let synonyms: Vec<&str> = expression.synonyms.iter().take(2).map(String::as_str).collect();
            text.push_str(&format!("🔄 *동의어:* {}\n", synonyms.join(", ")));
        }

        if !expression.context.is_empty() {
            text.push_str(&format!("📝 *예문:* {}\n", truncate_text(&expression.context, 60)));
        }

        text.push('\n');
    }

    text
}
