//! 试卷生成流程 - 流程层
//!
//! 流程顺序：
//! 1. 从词库无放回抽样
//! 2. 分配到五个部分
//! 3. 渲染试卷和答案
//! 4. 交付文件（失败时单独报告，不影响生成结果）

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::error::AppResult;
use crate::exam::synthesizer::MAX_SITUATIONAL_ITEMS;
use crate::exam::{allocate, render, ExamDocuments, SectionCounts};
use crate::infrastructure::BankBackend;
use crate::models::exam::SectionTargets;
use crate::models::word::WordRecord;
use crate::services::word_store::sample_records;
use crate::services::{DeliveredFiles, ExamWriter, WordStore};

/// 一次生成的结果
#[derive(Debug, Clone)]
pub struct GeneratedExam {
    /// 各部分实际渲染的题数
    pub counts: SectionCounts,
    pub documents: ExamDocuments,
}

/// 生成 + 交付的结果
#[derive(Debug)]
pub struct ExamReport {
    pub exam: GeneratedExam,
    pub delivery: AppResult<DeliveredFiles>,
}

/// 试卷生成流程
pub struct ExamFlow<B: BankBackend> {
    store: Arc<WordStore<B>>,
    rng: Mutex<ChaCha8Rng>,
    writer: ExamWriter,
}

impl<B: BankBackend + 'static> ExamFlow<B> {
    /// `seed` 为空时使用系统熵
    pub fn new(store: Arc<WordStore<B>>, writer: ExamWriter, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!("使用固定随机种子: {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            store,
            rng: Mutex::new(rng),
            writer,
        }
    }

    /// 抽样、分配并渲染
    pub fn generate(
        &self,
        targets: &SectionTargets,
        generated_at: NaiveDateTime,
    ) -> AppResult<GeneratedExam> {
        let records = self.store.all_records()?;
        self.generate_from(&records, targets, generated_at)
    }

    fn generate_from(
        &self,
        records: &[WordRecord],
        targets: &SectionTargets,
        generated_at: NaiveDateTime,
    ) -> AppResult<GeneratedExam> {
        let sample = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            sample_records(records, targets.total, &mut *rng)
        };

        let allocation = allocate(&sample, targets)?;
        let documents = render(&allocation, generated_at);

        let mut counts = allocation.counts();
        counts.composition = counts.composition.min(MAX_SITUATIONAL_ITEMS);
        counts.context = counts.context.min(MAX_SITUATIONAL_ITEMS);

        info!(
            "✓ 试卷生成完成: {} 题 (S1 {} / S2 {} / S3 {} / S4 {} / S5 {})",
            documents.question_count,
            counts.to_native,
            counts.to_foreign,
            counts.composition,
            counts.context,
            counts.synonyms
        );

        Ok(GeneratedExam { counts, documents })
    }

    /// 生成并交付
    ///
    /// 只有生成失败才返回 `Err`；交付失败记录在 `ExamReport::delivery` 中
    pub async fn run(&self, targets: &SectionTargets) -> AppResult<ExamReport> {
        let records = self.store.all_records_blocking().await?;
        let exam = self.generate_from(&records, targets, Local::now().naive_local())?;

        let delivery = self.writer.deliver(&exam.documents).await;
        if let Err(e) = &delivery {
            error!("试卷文件交付失败: {}", e);
        }

        Ok(ExamReport { exam, delivery })
    }
}
