use crate::error::{AppError, AppResult, FileError};
use crate::models::article::{DailyMaterials, RawArticle};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

async fn read_toml<T: DeserializeOwned>(toml_file_path: &Path) -> AppResult<T> {
    let path = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path, e))?;

    let value = toml::from_str(&content)
        .map_err(|source| FileError::TomlParseFailed { path: path.clone(), source })?;

    Ok(value)
}

/// 从 TOML 文件加载每日学习资料
pub async fn load_daily_materials(toml_file_path: &Path) -> AppResult<DailyMaterials> {
    let materials: DailyMaterials = read_toml(toml_file_path).await?;

    tracing::info!(
        "成功加载学习资料: {} ({} 个段落)",
        materials.article.title,
        materials.article.paragraphs.len()
    );

    Ok(materials)
}

/// 从 TOML 文件加载待加工的英文原文
pub async fn load_raw_article(toml_file_path: &Path) -> AppResult<RawArticle> {
    let article: RawArticle = read_toml(toml_file_path).await?;

    tracing::info!(
        "成功加载原文: {} ({} 个段落)",
        article.title,
        article.paragraphs.len()
    );

    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article::ParagraphKind;
    use std::io::Write;

    const SAMPLE: &str = r#"
[article]
title = "Hospitals Try New Scheduling"
topic = "medical"
published_date = "2024-05-01T10:00:00Z"

[[article.paragraphs]]
paragraph_number = 1
type = "english"
content = "First paragraph."

[[article.paragraphs]]
paragraph_number = 2
type = "korean"
content = "두 번째 문단."

[commentary]
source_title = "Hospitals Try New Scheduling"

[[commentary.expressions]]
expression = "on call"
korean_meaning = "대기 중인"
synonyms = ["standing by"]
"#;

    #[tokio::test]
    async fn test_load_daily_materials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let materials = load_daily_materials(file.path()).await.unwrap();
        assert_eq!(materials.article.source, "New York Times");
        assert_eq!(materials.article.paragraphs[1].kind, ParagraphKind::Korean);
        assert_eq!(materials.article.english_count(), 1);
        assert_eq!(materials.article.korean_count(), 1);
        let commentary = materials.commentary.unwrap();
        assert_eq!(commentary.expressions[0].context, "");
    }

    #[tokio::test]
    async fn test_load_raw_article() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            "title = \"Quiet Streets\"\ntopic = \"politics\"\nparagraphs = [\"One.\", \"Two.\"]\n"
                .as_bytes(),
        )
        .unwrap();

        let article = load_raw_article(file.path()).await.unwrap();
        assert_eq!(article.paragraphs, vec!["One.", "Two."]);
        assert_eq!(article.link, "");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_daily_materials(Path::new("/nonexistent/materials.toml")).await;
        assert!(matches!(result, Err(AppError::File(FileError::ReadFailed { .. }))));
    }
}
