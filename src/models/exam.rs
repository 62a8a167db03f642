//! 试卷配额

use serde::{Deserialize, Serialize};

/// 题目总数下限
pub const MIN_TOTAL: usize = 10;
/// 题目总数上限
pub const MAX_TOTAL: usize = 100;
/// 生成试卷所需的最少单词数
pub const MIN_EXAM_WORDS: usize = 10;

/// 五个部分的目标题数
///
/// `total` 的范围由命令层检查，分配器本身不再校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTargets {
    /// 抽样单词总数
    pub total: usize,
    /// Section 1: 外语 → 母语
    pub to_native: usize,
    /// Section 2: 母语 → 外语
    pub to_foreign: usize,
    /// Section 3: 造句
    pub composition: usize,
    /// Section 4: 情境翻译
    pub context: usize,
    /// Section 5: 同义词
    pub synonyms: usize,
}

impl Default for SectionTargets {
    fn default() -> Self {
        Self {
            total: 30,
            to_native: 15,
            to_foreign: 15,
            composition: 5,
            context: 5,
            synonyms: 10,
        }
    }
}

impl SectionTargets {
    /// 只修改总数，其余使用默认值
    pub fn with_total(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }
}
