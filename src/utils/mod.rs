pub mod chunker;
pub mod logging;

pub use chunker::chunk_text;
pub use logging::truncate_text;
