//! 聊天命令分发 - 编排层
//!
//! 把一行文本分发给对应的流程，并把结果转换成回复消息。
//! 所有错误都在这里变成可读的回复，不会向上传播。

use tracing::{error, info, warn};

use crate::error::{AppError, CommandError};
use crate::infrastructure::BankBackend;
use crate::models::exam::{SectionTargets, MAX_TOTAL, MIN_TOTAL};
use crate::services::DefinitionProvider;
use crate::workflow::{format_reply, parse_command, Command, ExamFlow, ExamReport, LookupFlow};

const HELP_TEXT: &str = "📚 *영어 단어 봇 사용법*

*명령어:*
• `@단어` - 영어 단어 뜻 조회 및 저장
• `시험지` 또는 `시험지 30` - 시험지 생성 (기본 30문제)
• `시험지 40 s1=20 s2=10 s3=3 s4=3 s5=5` - 섹션별 문제 수 지정
• `도움말` - 이 메시지 표시

*예시:*
• `@hello` - hello 단어 조회
• `@take care of` - 구문 조회
• `시험지 50` - 50문제 시험지 생성

*시험지 구성:*
✅ Section 1: 영→한 번역
✅ Section 2: 한→영 번역
✅ Section 3: 영어 작문
✅ Section 4: 문맥 번역
✅ Section 5: 동의어 선택
✅ 답지 자동 생성";

/// 命令分发器
pub struct BotHandler<P: DefinitionProvider, B: BankBackend> {
    exam_flow: ExamFlow<B>,
    lookup_flow: LookupFlow<P, B>,
}

impl<P: DefinitionProvider, B: BankBackend + 'static> BotHandler<P, B> {
    pub fn new(exam_flow: ExamFlow<B>, lookup_flow: LookupFlow<P, B>) -> Self {
        Self {
            exam_flow,
            lookup_flow,
        }
    }

    /// 处理一行文本，按顺序返回要发送的回复
    ///
    /// 不需要回复的文本返回空列表
    pub async fn handle(&self, text: &str) -> Vec<String> {
        let command = match parse_command(text) {
            Ok(command) => command,
            Err(e) => {
                warn!("命令解析失败: {}", e);
                return vec![command_error_reply(&e)];
            }
        };

        match command {
            Command::Lookup(word) => self.handle_lookup(&word).await,
            Command::Exam(targets) => self.handle_exam(&targets).await,
            Command::Help => vec![HELP_TEXT.to_string()],
            Command::Ignored => Vec::new(),
        }
    }

    async fn handle_lookup(&self, word: &str) -> Vec<String> {
        info!("📖 查询单词: {}", word);
        let mut replies = vec![format!("🔍 '{}' 검색 중...", word)];

        match self.lookup_flow.run(word).await {
            Ok(outcome) => replies.push(format_reply(&outcome)),
            Err(AppError::Llm(e)) => {
                error!("释义查询失败: {}", e);
                replies.push(format!("❌ '{}'의 정보를 찾을 수 없습니다.", word));
            }
            Err(e) => {
                error!("单词处理失败: {}", e);
                replies.push(format!("❌ 처리 중 오류가 발생했습니다: {}", e));
            }
        }

        replies
    }

    async fn handle_exam(&self, targets: &SectionTargets) -> Vec<String> {
        info!("📝 生成试卷: {:?}", targets);
        let mut replies = vec![format!(
            "📝 {}문제 시험지 생성 중... 잠시만 기다려주세요.",
            targets.total
        )];

        match self.exam_flow.run(targets).await {
            Ok(report) => replies.push(exam_summary(&report)),
            Err(e) => {
                error!("试卷生成失败: {}", e);
                replies.push(format!("❌ 시험지 생성 실패: {}", e));
            }
        }

        replies
    }
}

fn command_error_reply(err: &AppError) -> String {
    match err {
        AppError::Command(CommandError::TotalOutOfRange { .. }) => format!(
            "❌ 문제 수는 {}~{}개 사이로 입력해주세요. 예: 시험지 30",
            MIN_TOTAL, MAX_TOTAL
        ),
        AppError::Command(CommandError::InvalidNumber { .. }) => {
            "❌ 올바른 숫자를 입력해주세요. 예: 시험지 30".to_string()
        }
        other => format!("❌ 처리 중 오류가 발생했습니다: {}", other),
    }
}

fn exam_summary(report: &ExamReport) -> String {
    let counts = &report.exam.counts;
    let mut summary = format!(
        "📄 **시험지 생성 완료!**

📊 **구성:**
• Section 1: 영→한 번역 ({}문제)
• Section 2: 한→영 번역 ({}문제)
• Section 3: 영어 작문 ({}문제)
• Section 4: 문맥 번역 ({}문제)
• Section 5: 동의어 선택 ({}문제)

**총 {}문제**

",
        counts.to_native,
        counts.to_foreign,
        counts.composition,
        counts.context,
        counts.synonyms,
        report.exam.documents.question_count
    );

    match &report.delivery {
        Ok(files) => summary.push_str(&format!(
            "✅ 시험지와 답지가 별도 파일로 생성되었습니다.\n• {}\n• {}",
            files.exam_path.display(),
            files.answer_path.display()
        )),
        Err(e) => summary.push_str(&format!("⚠️ 시험지 파일 전송 실패: {}", e)),
    }

    summary
}
