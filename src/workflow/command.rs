//! 命令解析
//!
//! 把一行聊天文本解析成 `Command`

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, AppResult, CommandError};
use crate::models::exam::{SectionTargets, MAX_TOTAL, MIN_TOTAL};

/// 聊天命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `@word` 查询并保存单词或短语
    Lookup(String),
    /// `시험지 [total] [s1=N] … [s5=N]` 生成试卷
    Exam(SectionTargets),
    /// `도움말` / `help`
    Help,
    /// 其他文本，不回复
    Ignored,
}

fn lookup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@(\S.*)$").expect("lookup regex"))
}

fn exam_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:시험지|test paper)(.*)$").expect("exam regex"))
}

fn override_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^s([1-5])=(.*)$").expect("override regex"))
}

/// 解析一行文本
///
/// 数字无法解析时返回 `InvalidNumber`，总数不在 `[10, 100]` 内时返回 `TotalOutOfRange`。
pub fn parse_command(text: &str) -> AppResult<Command> {
    let text = text.trim();

    if let Some(caps) = lookup_regex().captures(text) {
        return Ok(Command::Lookup(caps[1].trim().to_string()));
    }

    if let Some(caps) = exam_regex().captures(text) {
        return parse_exam(&caps[1]).map(Command::Exam);
    }

    if text == "도움말" || text.eq_ignore_ascii_case("help") {
        return Ok(Command::Help);
    }

    Ok(Command::Ignored)
}

fn invalid_number(value: &str) -> AppError {
    CommandError::InvalidNumber {
        value: value.to_string(),
    }
    .into()
}

/// 只接受十进制数字，`-5`、`+5`、`abc` 都视为无效
fn parse_count(value: &str) -> AppResult<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_number(value));
    }
    value.parse().map_err(|_| invalid_number(value))
}

/// 解析命令关键字之后的参数：`[total] [s1=N] … [s5=N]`
///
/// 覆盖项必须按 s1..s5 的顺序出现且不能重复，其余任何内容都返回 `InvalidNumber`
fn parse_exam(args: &str) -> AppResult<SectionTargets> {
    let mut targets = SectionTargets::default();
    let mut tokens = args.split_whitespace().peekable();

    if let Some(token) = tokens.peek() {
        if !token.contains('=') {
            targets.total = parse_count(token)?;
            tokens.next();
        }
    }

    let mut last_section = 0;
    for token in tokens {
        let caps = override_regex()
            .captures(token)
            .ok_or_else(|| invalid_number(token))?;
        let section: usize = caps[1].parse().map_err(|_| invalid_number(token))?;
        if section <= last_section {
            return Err(invalid_number(token));
        }
        last_section = section;

        let count = parse_count(&caps[2])?;
        match section {
            1 => targets.to_native = count,
            2 => targets.to_foreign = count,
            3 => targets.composition = count,
            4 => targets.context = count,
            _ => targets.synonyms = count,
        }
    }

    if !(MIN_TOTAL..=MAX_TOTAL).contains(&targets.total) {
        return Err(CommandError::TotalOutOfRange {
            total: targets.total,
            min: MIN_TOTAL,
            max: MAX_TOTAL,
        }
        .into());
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup() {
        assert_eq!(
            parse_command("@hello").unwrap(),
            Command::Lookup("hello".to_string())
        );
        assert_eq!(
            parse_command("@take care of ").unwrap(),
            Command::Lookup("take care of".to_string())
        );
        assert_eq!(parse_command("@ hello").unwrap(), Command::Ignored);
    }

    #[test]
    fn test_parse_exam_defaults() {
        assert_eq!(
            parse_command("시험지").unwrap(),
            Command::Exam(SectionTargets::default())
        );
        assert_eq!(
            parse_command("test paper 50").unwrap(),
            Command::Exam(SectionTargets::with_total(50))
        );
    }

    #[test]
    fn test_parse_exam_overrides() {
        let command = parse_command("시험지 40 s1=20 s2=10 s3=3 s4=2 s5=7").unwrap();
        assert_eq!(
            command,
            Command::Exam(SectionTargets {
                total: 40,
                to_native: 20,
                to_foreign: 10,
                composition: 3,
                context: 2,
                synonyms: 7,
            })
        );

        // 只覆盖部分参数
        let command = parse_command("시험지 20 s1=8").unwrap();
        let Command::Exam(targets) = command else {
            panic!("expected exam command");
        };
        assert_eq!(targets.to_native, 8);
        assert_eq!(targets.to_foreign, 15);
    }

    #[test]
    fn test_parse_exam_out_of_range() {
        for text in ["시험지 9", "시험지 101", "시험지 0"] {
            let err = parse_command(text).unwrap_err();
            assert!(matches!(
                err,
                AppError::Command(CommandError::TotalOutOfRange { .. })
            ));
        }
        assert!(parse_command("시험지 10").is_ok());
        assert!(parse_command("시험지 100").is_ok());
    }

    #[test]
    fn test_parse_exam_invalid_number() {
        for text in [
            "시험지 99999999999999999999999",
            "시험지 -5",
            "시험지 +5",
            "시험지 abc",
            "시험지 30 s1=abc",
            "시험지 30 s1=",
            "시험지 30 s6=3",
            "시험지 30 s3=2 s1=4",
            "시험지 30 s1=4 s1=5",
            "시험지 30 40",
            "test paper 30 extra",
        ] {
            let err = parse_command(text).unwrap_err();
            assert!(
                matches!(err, AppError::Command(CommandError::InvalidNumber { .. })),
                "{} => {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_parse_exam_overrides_without_total() {
        let command = parse_command("시험지 s2=7 s5=3").unwrap();
        assert_eq!(
            command,
            Command::Exam(SectionTargets {
                to_foreign: 7,
                synonyms: 3,
                ..SectionTargets::default()
            })
        );
        assert_eq!(
            parse_command("시험지30").unwrap(),
            Command::Exam(SectionTargets::default())
        );
    }

    #[test]
    fn test_parse_help_and_ignored() {
        assert_eq!(parse_command("도움말").unwrap(), Command::Help);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("hello there").unwrap(), Command::Ignored);
        assert_eq!(parse_command("").unwrap(), Command::Ignored);
    }
}
