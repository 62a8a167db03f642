pub mod toml_loader;

pub use toml_loader::{load_daily_materials, load_raw_article};
