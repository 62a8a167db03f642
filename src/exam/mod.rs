//! 试卷核心
//!
//! - `allocator` - 把抽样单词分配到五个部分
//! - `synthesizer` - 渲染试卷和答案

pub mod allocator;
pub mod synthesizer;

pub use allocator::{allocate, Allocation, ExamSection, SectionCounts};
pub use synthesizer::{render, ExamDocuments};
