//! 试卷与答案渲染
//!
//! 纯渲染，不做任何校验。生成时间由调用方传入，同一次渲染的两份文档共用一个时间戳。

use chrono::NaiveDateTime;

use crate::exam::allocator::{Allocation, ExamSection};
use crate::models::exam::SectionTargets;

/// Section 3、4 最多渲染的题目数
pub const MAX_SITUATIONAL_ITEMS: usize = 5;

/// Section 4 的固定情境，按顺序与单词一一对应
pub const CONTEXT_SITUATIONS: [&str; MAX_SITUATIONAL_ITEMS] = [
    "비즈니스 회의에서",
    "친구와의 일상 대화에서",
    "공식적인 이메일에서",
    "카페에서 주문할 때",
    "여행 중 호텔에서",
];

const TIMESTAMP_FORMAT: &str = "%Y년 %m월 %d일 %H시 %M분";
const SHORT_BLANK: &str = "________________________";
const LONG_BLANK: &str = "________________________________________________";

/// 渲染得到的两份文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDocuments {
    pub generated_at: NaiveDateTime,
    /// 试卷
    pub exam: String,
    /// 答案
    pub answer_key: String,
    /// 试卷标题中的总题数
    pub question_count: usize,
}

/// 渲染试卷和答案
pub fn render(allocation: &Allocation, generated_at: NaiveDateTime) -> ExamDocuments {
    let question_count = advertised_total(allocation);
    let timestamp = generated_at.format(TIMESTAMP_FORMAT).to_string();

    let mut exam = format!(
        "\n# 영어 실력 향상 시험지\n**생성일시**: {}\n**총 문항수**: {}문제\n",
        timestamp, question_count
    );
    let mut answer_key = format!(
        "\n# 영어 실력 향상 시험지 - 정답\n**생성일시**: {}\n",
        timestamp
    );

    for section in allocation.sections() {
        render_exam_section(&mut exam, section, &allocation.targets);
        render_answer_section(&mut answer_key, section);
    }

    ExamDocuments {
        generated_at,
        exam,
        answer_key,
        question_count,
    }
}

/// 标题中的总题数：Section 3、4 使用配置值（最多 5），其余使用实际数量
fn advertised_total(allocation: &Allocation) -> usize {
    let targets = &allocation.targets;
    allocation.to_native.len()
        + allocation.to_foreign.len()
        + targets.composition.min(MAX_SITUATIONAL_ITEMS)
        + targets.context.min(MAX_SITUATIONAL_ITEMS)
        + allocation.synonyms.len()
}

fn push_heading(out: &mut String, heading: &str, instruction: Option<&str>) {
    out.push_str("\n---\n\n");
    out.push_str(&format!("## {}\n", heading));
    if let Some(instruction) = instruction {
        out.push_str(&format!("*{}*\n", instruction));
    }
    out.push('\n');
}

fn render_exam_section(out: &mut String, section: ExamSection<'_>, targets: &SectionTargets) {
    match section {
        ExamSection::ToNative(words) => {
            push_heading(
                out,
                &format!("Section 1: 영→한 번역 ({}문제)", words.len()),
                Some("다음 영어 단어/표현의 한글 뜻을 쓰시오."),
            );
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, word.word));
                out.push_str(&format!("   답: {}\n\n", SHORT_BLANK));
            }
        }
        ExamSection::ToForeign(words) => {
            push_heading(
                out,
                &format!("Section 2: 한→영 번역 ({}문제)", words.len()),
                Some("다음 한글 뜻에 해당하는 영어 단어/표현을 쓰시오."),
            );
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, word.meaning));
                out.push_str(&format!("   답: {}\n\n", SHORT_BLANK));
            }
        }
        ExamSection::Composition(words) => {
            push_heading(
                out,
                &format!(
                    "Section 3: 영어 작문 ({}문제)",
                    targets.composition.min(MAX_SITUATIONAL_ITEMS)
                ),
                Some("제시된 단어를 활용하여 영어 문장을 만드시오."),
            );
            for (i, word) in words.iter().take(MAX_SITUATIONAL_ITEMS).enumerate() {
                out.push_str(&format!("{}. 제시어: **{}**\n", i + 1, word.word));
                out.push_str(&format!("   문장: {}\n\n", LONG_BLANK));
            }
        }
        ExamSection::Context(words) => {
            push_heading(
                out,
                &format!(
                    "Section 4: 문맥 번역 ({}문제)",
                    targets.context.min(MAX_SITUATIONAL_ITEMS)
                ),
                Some("다음 상황에서 제시된 단어를 사용하여 적절한 영어 표현을 쓰시오."),
            );
            for (i, (word, situation)) in words.iter().zip(CONTEXT_SITUATIONS).enumerate() {
                out.push_str(&format!("{}. 상황: {}\n", i + 1, situation));
                out.push_str(&format!("   단어: **{}**\n", word.word));
                out.push_str(&format!("   표현: {}\n\n", LONG_BLANK));
            }
        }
        ExamSection::Synonyms(words) => {
            // 没有带同义词的单词时整个部分省略
            if words.is_empty() {
                return;
            }
            push_heading(
                out,
                &format!("Section 5: 동의어 선택 ({}문제)", words.len()),
                Some("다음 단어의 동의어를 모두 쓰시오."),
            );
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. **{}**의 동의어 (최소 2개):\n", i + 1, word.word));
                out.push_str(&format!("   답: {}\n\n", LONG_BLANK));
            }
        }
    }
}

fn render_answer_section(out: &mut String, section: ExamSection<'_>) {
    match section {
        ExamSection::ToNative(words) => {
            push_heading(out, "Section 1: 영→한 번역 정답", None);
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. {} → **{}**\n", i + 1, word.word, word.meaning));
            }
        }
        ExamSection::ToForeign(words) => {
            push_heading(out, "Section 2: 한→영 번역 정답", None);
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. {} → **{}**\n", i + 1, word.meaning, word.word));
            }
        }
        ExamSection::Composition(words) => {
            push_heading(out, "Section 3: 영어 작문 예시 답안", None);
            for (i, word) in words.iter().take(MAX_SITUATIONAL_ITEMS).enumerate() {
                out.push_str(&format!(
                    "{}. {}: (예시) This example shows how to use {} correctly.\n",
                    i + 1,
                    word.word,
                    word.word
                ));
            }
        }
        ExamSection::Context(words) => {
            push_heading(out, "Section 4: 문맥 번역 예시 답안", None);
            for (i, (word, situation)) in words.iter().zip(CONTEXT_SITUATIONS).enumerate() {
                out.push_str(&format!(
                    "{}. {} - {}: (상황에 맞는 표현 사용)\n",
                    i + 1,
                    situation,
                    word.word
                ));
            }
        }
        ExamSection::Synonyms(words) => {
            if words.is_empty() {
                return;
            }
            push_heading(out, "Section 5: 동의어 정답", None);
            for (i, word) in words.iter().enumerate() {
                out.push_str(&format!("{}. {}: **{}**\n", i + 1, word.word, word.synonyms_joined()));
            }
        }
    }
}
