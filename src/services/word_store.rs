//! 词库服务 - 业务能力层
//!
//! 只负责"查重 / 追加 / 读取 / 抽样"，不关心单词从哪里来。

use std::sync::{Arc, Mutex, MutexGuard};

use rand::seq::index;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, StoreError};
use crate::infrastructure::{BankBackend, BankRow};
use crate::models::word::{same_word, WordRecord};

/// 词库服务
///
/// 查重和追加在同一把锁内完成，并发调用 `append` 不会写入重复单词。
/// 同步方法会直接执行后端 I/O，在异步上下文中应使用 `*_blocking` 版本。
pub struct WordStore<B: BankBackend> {
    backend: Mutex<B>,
}

impl<B: BankBackend> WordStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }

    fn lock(&self) -> MutexGuard<'_, B> {
        self.backend.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 不区分大小写检查单词是否已存在
    pub fn exists(&self, word: &str) -> AppResult<bool> {
        let backend = self.lock();
        contains_word(&*backend, word)
    }

    /// 追加单词，已存在时返回 `DuplicateWord`
    pub fn append(&self, record: WordRecord) -> AppResult<()> {
        if record.word.trim().is_empty() {
            return Err(StoreError::EmptyWord.into());
        }

        let mut backend = self.lock();
        if contains_word(&*backend, &record.word)? {
            debug!("重复单词: {}", record.word);
            return Err(AppError::duplicate_word(record.word));
        }

        backend.append_row(BankRow::from(&record))?;
        info!("✓ 单词已保存: {}", record.word);
        Ok(())
    }

    /// 按插入顺序读取全部单词
    pub fn all_records(&self) -> AppResult<Vec<WordRecord>> {
        let rows = self.lock().list_all()?;
        Ok(rows.into_iter().map(WordRecord::from).collect())
    }

    /// 无放回随机抽取 `min(count, 词库大小)` 个单词
    ///
    /// 返回顺序是随机的；词库不足时返回全部单词（同样打乱顺序）。
    pub fn sample_without_replacement<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> AppResult<Vec<WordRecord>> {
        Ok(sample_records(&self.all_records()?, count, rng))
    }
}

impl<B: BankBackend + 'static> WordStore<B> {
    /// 在阻塞线程池中执行 `append`
    ///
    /// 文件词库使用同步 I/O，异步流程通过这里调用，不占用 tokio 工作线程
    pub async fn append_blocking(self: &Arc<Self>, record: WordRecord) -> AppResult<()> {
        let store = Arc::clone(self);
        run_blocking(move || store.append(record)).await
    }

    /// 在阻塞线程池中执行 `all_records`
    pub async fn all_records_blocking(self: &Arc<Self>) -> AppResult<Vec<WordRecord>> {
        let store = Arc::clone(self);
        run_blocking(move || store.all_records()).await
    }
}

async fn run_blocking<T, F>(task: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| StoreError::TaskFailed {
            reason: e.to_string(),
        })?
}

/// 从已读取的记录中无放回抽取 `min(count, records.len())` 个
pub fn sample_records<R: Rng + ?Sized>(
    records: &[WordRecord],
    count: usize,
    rng: &mut R,
) -> Vec<WordRecord> {
    if records.len() < count {
        warn!(
            "请求的单词数 ({}) 多于词库中的单词数 ({})",
            count,
            records.len()
        );
    }

    let amount = count.min(records.len());
    let picked: Vec<WordRecord> = index::sample(rng, records.len(), amount)
        .into_iter()
        .map(|i| records[i].clone())
        .collect();

    info!("随机抽取单词 {} 个", picked.len());
    picked
}

fn contains_word<B: BankBackend + ?Sized>(backend: &B, word: &str) -> AppResult<bool> {
    Ok(backend
        .list_all()?
        .iter()
        .any(|row| same_word(&row.word, word)))
}
