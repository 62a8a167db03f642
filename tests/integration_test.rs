use std::sync::Arc;

use vocab_exam_bot::error::AppResult;
use vocab_exam_bot::services::ExamWriter;
use vocab_exam_bot::{
    BotHandler, DefinitionProvider, ExamFlow, LookupFlow, MemoryBank, TomlBankFile,
    WordDefinition, WordRecord, WordStore,
};

/// 不访问网络的释义提供者
struct StubProvider;

impl DefinitionProvider for StubProvider {
    async fn define(&self, word: &str) -> AppResult<WordDefinition> {
        Ok(WordDefinition {
            word: word.to_string(),
            korean_meaning: format!("{}의 뜻", word),
            synonyms: vec![format!("{}-syn", word)],
            example: format!("This is {}.", word),
            korean_example: "예문입니다.".to_string(),
        })
    }
}

fn seeded_store(count: usize) -> Arc<WordStore<MemoryBank>> {
    let store = WordStore::new(MemoryBank::new());
    for i in 0..count {
        store
            .append(WordRecord::new(
                format!("word{}", i),
                format!("뜻{}", i),
                vec![format!("syn{}", i)],
            ))
            .unwrap();
    }
    Arc::new(store)
}

fn handler(
    store: Arc<WordStore<MemoryBank>>,
    output_dir: &std::path::Path,
) -> BotHandler<StubProvider, MemoryBank> {
    let exam_flow = ExamFlow::new(store.clone(), ExamWriter::new(output_dir), Some(2024));
    let lookup_flow = LookupFlow::new(StubProvider, store);
    BotHandler::new(exam_flow, lookup_flow)
}

#[tokio::test]
async fn test_exam_command_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let bot = handler(seeded_store(40), dir.path());

    let replies = bot.handle("시험지").await;
    assert_eq!(replies.len(), 2);
    assert!(replies[0].starts_with("📝 30문제 시험지 생성 중"));
    assert!(replies[1].contains("• Section 1: 영→한 번역 (15문제)"));
    assert!(replies[1].contains("• Section 5: 동의어 선택 (10문제)"));
    assert!(replies[1].contains("**총 50문제**"));
    assert!(replies[1].contains("✅ 시험지와 답지가 별도 파일로 생성되었습니다."));

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|name| name.starts_with("영어시험지_답지_")));
}

#[tokio::test]
async fn test_exam_command_with_insufficient_words() {
    let dir = tempfile::tempdir().unwrap();
    let bot = handler(seeded_store(5), dir.path());

    let replies = bot.handle("시험지 20").await;
    assert_eq!(replies.len(), 2);
    assert!(replies[1].starts_with("❌ 시험지 생성 실패"));
    assert!(replies[1].contains("当前: 5"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_exam_command_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let bot = handler(seeded_store(40), dir.path());

    assert_eq!(
        bot.handle("시험지 5").await,
        vec!["❌ 문제 수는 10~100개 사이로 입력해주세요. 예: 시험지 30".to_string()]
    );
    assert_eq!(
        bot.handle("시험지 123456789012345678901234567890").await,
        vec!["❌ 올바른 숫자를 입력해주세요. 예: 시험지 30".to_string()]
    );
}

#[tokio::test]
async fn test_lookup_saves_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(0);
    let bot = handler(store.clone(), dir.path());

    let replies = bot.handle("@Serendipity").await;
    assert_eq!(replies[0], "🔍 'Serendipity' 검색 중...");
    assert!(replies[1].ends_with("✅ *단어장에 저장 완료!*"));

    let replies = bot.handle("@serendipity").await;
    assert!(replies[1].ends_with("ℹ️ *이미 저장된 단어입니다.*"));

    let records = store.all_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].word, "Serendipity");
    assert_eq!(records[0].synonyms, vec!["Serendipity-syn".to_string()]);
}

#[test]
fn test_help_and_ignored_text() {
    let dir = tempfile::tempdir().unwrap();
    let bot = handler(seeded_store(0), dir.path());

    let help = tokio_test::block_on(bot.handle("도움말"));
    assert_eq!(help.len(), 1);
    assert!(help[0].contains("`@단어`"));

    assert!(tokio_test::block_on(bot.handle("good morning")).is_empty());
}

#[test]
fn test_file_bank_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("word_bank.toml");

    let store = WordStore::new(TomlBankFile::new(&path));
    store
        .append(WordRecord::new("resilient", "회복력 있는", vec!["tough".to_string()]))
        .unwrap();
    store
        .append(WordRecord::new("take care of", "돌보다", Vec::new()))
        .unwrap();

    let reopened = WordStore::new(TomlBankFile::new(&path));
    assert!(reopened.exists("RESILIENT").unwrap());
    assert!(reopened
        .append(WordRecord::new("Resilient", "다른 뜻", Vec::new()))
        .unwrap_err()
        .is_duplicate_word());

    let records = reopened.all_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].word, "take care of");
    assert!(records[1].synonyms.is_empty());
}
