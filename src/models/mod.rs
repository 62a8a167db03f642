pub mod article;
pub mod exam;
pub mod loaders;
pub mod word;

pub use article::{
    ArticleParagraph, Commentary, ContentStructure, DailyMaterials, Expression, MixedArticle,
    ParagraphKind, RawArticle, TranslationExercise,
};
pub use exam::SectionTargets;
pub use loaders::{load_daily_materials, load_raw_article};
pub use word::WordRecord;
