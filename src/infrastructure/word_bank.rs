//! 词库持久化
//!
//! 每一行是 `(word, meaning, synonyms)` 三个字符串，
//! 同义词以 `", "` 连接保存，空字符串表示没有同义词。

use crate::error::{AppError, AppResult, FileError};
use crate::models::word::{split_synonyms, WordRecord};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::debug;

/// 持久化的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRow {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub synonyms: String,
}

impl From<&WordRecord> for BankRow {
    fn from(record: &WordRecord) -> Self {
        Self {
            word: record.word.clone(),
            meaning: record.meaning.clone(),
            synonyms: record.synonyms_joined(),
        }
    }
}

impl From<BankRow> for WordRecord {
    fn from(row: BankRow) -> Self {
        let synonyms = split_synonyms(&row.synonyms);
        WordRecord::new(row.word, row.meaning, synonyms)
    }
}

/// 词库持久化介质
pub trait BankBackend: Send {
    /// 按插入顺序读取所有行
    fn list_all(&self) -> AppResult<Vec<BankRow>>;

    /// 在末尾追加一行
    fn append_row(&mut self, row: BankRow) -> AppResult<()>;
}

/// 内存词库
#[derive(Debug, Default, Clone)]
pub struct MemoryBank {
    rows: Vec<BankRow>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BankBackend for MemoryBank {
    fn list_all(&self) -> AppResult<Vec<BankRow>> {
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, row: BankRow) -> AppResult<()> {
        self.rows.push(row);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BankDocument {
    #[serde(default)]
    rows: Vec<BankRow>,
}

/// TOML 文件词库
///
/// 文件由若干 `[[rows]]` 表组成，追加时只在文件末尾写入新表，不重写已有内容。
#[derive(Debug, Clone)]
pub struct TomlBankFile {
    path: PathBuf,
}

impl TomlBankFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl BankBackend for TomlBankFile {
    fn list_all(&self) -> AppResult<Vec<BankRow>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // 文件尚未创建时视为空词库
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::file_read_failed(self.path_string(), e)),
        };

        let document: BankDocument =
            toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
                path: self.path_string(),
                source,
            })?;

        debug!("词库读取完成: {} 行", document.rows.len());
        Ok(document.rows)
    }

    fn append_row(&mut self, row: BankRow) -> AppResult<()> {
        let fragment = toml::to_string(&BankDocument { rows: vec![row] })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))?;

        file.write_all(format!("\n{}", fragment).as_bytes())
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(word: &str, synonyms: &str) -> BankRow {
        BankRow {
            word: word.to_string(),
            meaning: format!("{} 뜻", word),
            synonyms: synonyms.to_string(),
        }
    }

    #[test]
    fn test_row_to_record() {
        let record: WordRecord = row("quick", "fast, rapid").into();
        assert_eq!(record.synonyms, vec!["fast", "rapid"]);

        let record: WordRecord = row("slow", "").into();
        assert!(record.synonyms.is_empty());
        assert_eq!(BankRow::from(&record).synonyms, "");
    }

    #[test]
    fn test_toml_bank_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bank = TomlBankFile::new(dir.path().join("bank.toml"));
        assert!(bank.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_toml_bank_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut bank = TomlBankFile::new(dir.path().join("bank.toml"));

        bank.append_row(row("alpha", "first, initial")).unwrap();
        bank.append_row(row("beta", "")).unwrap();
        bank.append_row(row("gamma \"quoted\"", "third")).unwrap();

        let rows = bank.list_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], row("alpha", "first, initial"));
        assert_eq!(rows[1].synonyms, "");
        assert_eq!(rows[2].word, "gamma \"quoted\"");
    }

    #[test]
    fn test_toml_bank_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        fs::write(&path, "rows = 3 = 4").unwrap();

        let bank = TomlBankFile::new(path);
        assert!(matches!(
            bank.list_all(),
            Err(AppError::File(FileError::TomlParseFailed { .. }))
        ));
    }
}
