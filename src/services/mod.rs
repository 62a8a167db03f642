pub mod article_processor;
pub mod channel_writer;
pub mod exam_writer;
pub mod llm_service;
pub mod notifier;
pub mod word_store;

pub use article_processor::{ArticleProcessor, SavedMaterials};
pub use channel_writer::{ChannelWriter, MessageChannel};
pub use exam_writer::{DeliveredFiles, ExamWriter};
pub use llm_service::{ArticleAssistant, DefinitionProvider, LlmService, WordDefinition};
pub use notifier::{ArticleNotifier, NotifyReport};
pub use word_store::WordStore;
