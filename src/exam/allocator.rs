//! 配额分配
//!
//! 把抽样得到的单词按五个部分的目标数切分。分配完全由输入决定，
//! 随机性只存在于上游的抽样。

use crate::error::{AppResult, ExamError};
use crate::models::exam::{SectionTargets, MIN_EXAM_WORDS};
use crate::models::word::WordRecord;

/// 试卷中的一个部分
#[derive(Debug, Clone, Copy)]
pub enum ExamSection<'a> {
    /// 外语 → 母语
    ToNative(&'a [WordRecord]),
    /// 母语 → 外语
    ToForeign(&'a [WordRecord]),
    /// 用提示词造句
    Composition(&'a [WordRecord]),
    /// 情境翻译
    Context(&'a [WordRecord]),
    /// 写出同义词
    Synonyms(&'a [WordRecord]),
}

/// 各部分实际分到的单词数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionCounts {
    pub to_native: usize,
    pub to_foreign: usize,
    pub composition: usize,
    pub context: usize,
    pub synonyms: usize,
}

impl SectionCounts {
    pub fn total(&self) -> usize {
        self.to_native + self.to_foreign + self.composition + self.context + self.synonyms
    }
}

/// 分配结果
///
/// Section 3/4/5 从 `to_native ++ to_foreign` 中切取，同一个单词可以出现在多个部分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub targets: SectionTargets,
    pub to_native: Vec<WordRecord>,
    pub to_foreign: Vec<WordRecord>,
    pub composition: Vec<WordRecord>,
    pub context: Vec<WordRecord>,
    pub synonyms: Vec<WordRecord>,
}

impl Allocation {
    /// 按固定顺序返回五个部分
    pub fn sections(&self) -> [ExamSection<'_>; 5] {
        [
            ExamSection::ToNative(&self.to_native),
            ExamSection::ToForeign(&self.to_foreign),
            ExamSection::Composition(&self.composition),
            ExamSection::Context(&self.context),
            ExamSection::Synonyms(&self.synonyms),
        ]
    }

    pub fn counts(&self) -> SectionCounts {
        SectionCounts {
            to_native: self.to_native.len(),
            to_foreign: self.to_foreign.len(),
            composition: self.composition.len(),
            context: self.context.len(),
            synonyms: self.synonyms.len(),
        }
    }
}

/// 越界时截断的切片，`start >= end` 时为空
fn window<T>(items: &[T], start: usize, end: usize) -> &[T] {
    let end = end.min(items.len());
    let start = start.min(end);
    &items[start..end]
}

/// 把抽样结果分配到五个部分
///
/// 抽样少于 10 个单词时返回 `InsufficientWords`。
pub fn allocate(sample: &[WordRecord], targets: &SectionTargets) -> AppResult<Allocation> {
    let available = sample.len();
    if available < MIN_EXAM_WORDS {
        return Err(ExamError::InsufficientWords {
            available,
            required: MIN_EXAM_WORDS,
        }
        .into());
    }

    let to_native = window(sample, 0, targets.to_native).to_vec();

    // 总数不足 30 时，尾部窗口一直延伸到样本末尾
    let tail_end = if targets.total >= 30 {
        targets.total
    } else {
        available
    };
    let mut to_foreign = window(sample, targets.to_native, tail_end).to_vec();
    if to_foreign.len() < targets.to_foreign {
        let missing = targets.to_foreign - to_foreign.len();
        to_foreign.extend_from_slice(window(sample, 0, missing));
    }
    to_foreign.truncate(targets.to_foreign);

    let pool: Vec<&WordRecord> = to_native.iter().chain(to_foreign.iter()).collect();

    let composition = window(&pool, 0, targets.composition)
        .iter()
        .map(|w| (*w).clone())
        .collect();
    let context = window(
        &pool,
        targets.composition,
        targets.composition.saturating_add(targets.context),
    )
    .iter()
    .map(|w| (*w).clone())
    .collect();
    let synonyms = pool
        .iter()
        .filter(|w| w.has_synonyms())
        .take(targets.synonyms)
        .map(|w| (*w).clone())
        .collect();

    Ok(Allocation {
        targets: *targets,
        to_native,
        to_foreign,
        composition,
        context,
        synonyms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use proptest::prelude::*;

    /// 生成 `n` 个单词，前 `with_synonyms` 个带同义词
    fn sample(n: usize, with_synonyms: usize) -> Vec<WordRecord> {
        (0..n)
            .map(|i| {
                let synonyms = if i < with_synonyms {
                    vec![format!("syn{}", i)]
                } else {
                    Vec::new()
                };
                WordRecord::new(format!("w{}", i), format!("m{}", i), synonyms)
            })
            .collect()
    }

    fn words(records: &[WordRecord]) -> Vec<&str> {
        records.iter().map(|r| r.word.as_str()).collect()
    }

    #[test]
    fn test_default_targets_thirty_words() {
        let sample = sample(30, 12);
        let allocation = allocate(&sample, &SectionTargets::default()).unwrap();

        assert_eq!(allocation.to_native.len(), 15);
        assert_eq!(allocation.to_foreign.len(), 15);
        assert_eq!(words(&allocation.to_foreign)[0], "w15");
        assert_eq!(words(&allocation.composition), vec!["w0", "w1", "w2", "w3", "w4"]);
        assert_eq!(words(&allocation.context), vec!["w5", "w6", "w7", "w8", "w9"]);
        assert_eq!(allocation.synonyms.len(), 10);
        assert_eq!(allocation.counts().total(), 15 + 15 + 5 + 5 + 10);
    }

    #[test]
    fn test_exactly_ten_words_succeeds() {
        let allocation = allocate(&sample(10, 0), &SectionTargets::with_total(10)).unwrap();
        assert_eq!(allocation.to_native.len(), 10);
        // 尾部窗口为空，全部从样本开头回绕
        assert_eq!(allocation.to_foreign.len(), 10);
        assert_eq!(words(&allocation.to_foreign)[0], "w0");
        assert!(allocation.synonyms.is_empty());
    }

    #[test]
    fn test_nine_words_rejected() {
        let result = allocate(&sample(9, 9), &SectionTargets::default());
        match result {
            Err(AppError::Exam(ExamError::InsufficientWords {
                available,
                required,
            })) => {
                assert_eq!(available, 9);
                assert_eq!(required, 10);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_small_total_wraps_around() {
        let sample = sample(12, 0);
        let targets = SectionTargets::with_total(12);
        let allocation = allocate(&sample, &targets).unwrap();

        // k < s1，第一部分取全部样本
        assert_eq!(allocation.to_native, sample);
        // sample[15..12] 为空，回绕时最多只能取到 12 个
        assert_eq!(allocation.to_foreign, sample);
    }

    #[test]
    fn test_small_total_tail_runs_to_sample_end() {
        // total < 30 时尾部窗口到样本末尾，而不是到 total
        let sample = sample(25, 0);
        let targets = SectionTargets {
            total: 20,
            to_native: 10,
            to_foreign: 12,
            ..Default::default()
        };
        let allocation = allocate(&sample, &targets).unwrap();
        assert_eq!(words(&allocation.to_foreign)[0], "w10");
        assert_eq!(words(&allocation.to_foreign)[11], "w21");
    }

    #[test]
    fn test_large_total_tail_stops_at_total() {
        let sample = sample(40, 0);
        let targets = SectionTargets {
            total: 30,
            to_native: 20,
            to_foreign: 15,
            ..Default::default()
        };
        let allocation = allocate(&sample, &targets).unwrap();
        // sample[20..30] 只有 10 个，再从开头补 5 个
        let foreign = words(&allocation.to_foreign);
        assert_eq!(foreign.len(), 15);
        assert_eq!(foreign[9], "w29");
        assert_eq!(&foreign[10..], &["w0", "w1", "w2", "w3", "w4"]);
    }

    #[test]
    fn test_short_pool_gives_short_sections() {
        let sample = sample(10, 3);
        let targets = SectionTargets {
            total: 10,
            to_native: 3,
            to_foreign: 2,
            composition: 4,
            context: 5,
            synonyms: 10,
        };
        let allocation = allocate(&sample, &targets).unwrap();
        assert_eq!(allocation.composition.len(), 4);
        // pool 只有 5 个，context 只剩 1 个
        assert_eq!(allocation.context.len(), 1);
        assert_eq!(words(&allocation.synonyms), vec!["w0", "w1", "w2"]);
    }

    #[test]
    fn test_zero_targets() {
        let targets = SectionTargets {
            total: 0,
            to_native: 0,
            to_foreign: 0,
            composition: 0,
            context: 0,
            synonyms: 0,
        };
        let allocation = allocate(&sample(10, 10), &targets).unwrap();
        assert_eq!(allocation.counts(), SectionCounts::default());
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let allocation = allocate(&sample(30, 30), &SectionTargets::default()).unwrap();
        let sections = allocation.sections();
        assert!(matches!(sections[0], ExamSection::ToNative(w) if w.len() == 15));
        assert!(matches!(sections[1], ExamSection::ToForeign(w) if w.len() == 15));
        assert!(matches!(sections[2], ExamSection::Composition(w) if w.len() == 5));
        assert!(matches!(sections[3], ExamSection::Context(w) if w.len() == 5));
        assert!(matches!(sections[4], ExamSection::Synonyms(w) if w.len() == 10));
    }

    proptest! {
        #[test]
        fn prop_section_sizes(
            k in 10usize..60,
            total in 0usize..120,
            s1 in 0usize..40,
            s2 in 0usize..40,
            s3 in 0usize..10,
            s4 in 0usize..10,
            s5 in 0usize..20,
            with_synonyms in 0usize..60,
        ) {
            let sample = sample(k, with_synonyms.min(k));
            let targets = SectionTargets {
                total,
                to_native: s1,
                to_foreign: s2,
                composition: s3,
                context: s4,
                synonyms: s5,
            };
            let allocation = allocate(&sample, &targets).unwrap();

            prop_assert_eq!(allocation.to_native.len(), s1.min(k));
            if k >= s2 {
                prop_assert_eq!(allocation.to_foreign.len(), s2);
            }
            prop_assert!(allocation.to_foreign.len() <= s2);
            prop_assert!(allocation.composition.len() <= s3);
            prop_assert!(allocation.context.len() <= s4);
            prop_assert!(allocation.synonyms.len() <= s5);
            prop_assert!(allocation.synonyms.iter().all(|w| w.has_synonyms()));
        }
    }
}
