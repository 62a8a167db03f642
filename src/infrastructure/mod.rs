//! 基础设施层
//!
//! 持有词库的持久化介质，只暴露"读全部行"和"追加一行"两种能力

pub mod word_bank;

pub use word_bank::{BankBackend, BankRow, MemoryBank, TomlBankFile};
