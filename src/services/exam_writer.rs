//! 试卷投递服务 - 业务能力层
//!
//! 只负责"把试卷和答案作为文件交付"能力，不关心试卷如何生成

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::exam::ExamDocuments;

/// 交付得到的两个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFiles {
    pub exam_path: PathBuf,
    pub answer_path: PathBuf,
}

/// 试卷投递服务
///
/// 职责：
/// - 把整份试卷和答案分别写成文件
/// - 文件名带生成时间，不分段
pub struct ExamWriter {
    output_dir: PathBuf,
}

impl ExamWriter {
    /// 使用输出目录创建
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写入试卷和答案
    ///
    /// # 返回
    /// 返回两个文件的路径
    pub async fn deliver(&self, documents: &ExamDocuments) -> AppResult<DeliveredFiles> {
        let dir = self.output_dir.display().to_string();
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(&dir, e))?;

        let timestamp = documents.generated_at.format("%Y%m%d_%H%M%S").to_string();

        debug!(
            "写入试卷 | 试卷长度: {} | 答案长度: {}",
            documents.exam.len(),
            documents.answer_key.len()
        );

        // 同一秒内生成的试卷追加序号，已有文件不会被覆盖
        let mut sequence = 1;
        let (exam_path, answer_path) = loop {
            let suffix = if sequence == 1 {
                timestamp.clone()
            } else {
                format!("{}_{}", timestamp, sequence)
            };
            let exam_path = self.output_dir.join(format!("영어시험지_{}.txt", suffix));
            let answer_path = self.output_dir.join(format!("영어시험지_답지_{}.txt", suffix));

            if create_new_file(&exam_path, &documents.exam).await? {
                break (exam_path, answer_path);
            }
            sequence += 1;
        };

        write_file(&answer_path, &documents.answer_key).await?;

        info!("✓ 试卷文件已生成: {}", exam_path.display());

        Ok(DeliveredFiles {
            exam_path,
            answer_path,
        })
    }
}

/// 只在文件不存在时创建并写入，文件已存在时返回 `false`
async fn create_new_file(path: &Path, content: &str) -> AppResult<bool> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;

    let mut file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(AppError::file_write_failed(path.display().to_string(), e)),
    };

    file.write_all(content.as_bytes())
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    file.flush()
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    Ok(true)
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn documents() -> ExamDocuments {
        ExamDocuments {
            generated_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            exam: "시험지".to_string(),
            answer_key: "정답".to_string(),
            question_count: 0,
        }
    }

    #[tokio::test]
    async fn test_deliver_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExamWriter::new(dir.path().join("nested"));

        let files = writer.deliver(&documents()).await.unwrap();
        assert!(files.exam_path.ends_with("영어시험지_20240102_030405.txt"));
        assert!(files.answer_path.ends_with("영어시험지_답지_20240102_030405.txt"));
        assert_eq!(fs::read_to_string(&files.exam_path).await.unwrap(), "시험지");
        assert_eq!(fs::read_to_string(&files.answer_path).await.unwrap(), "정답");
    }

    #[tokio::test]
    async fn test_deliver_same_second_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExamWriter::new(dir.path());

        let first = writer.deliver(&documents()).await.unwrap();
        let second_documents = ExamDocuments {
            exam: "두 번째 시험지".to_string(),
            answer_key: "두 번째 정답".to_string(),
            ..documents()
        };
        let second = writer.deliver(&second_documents).await.unwrap();

        assert_ne!(first.exam_path, second.exam_path);
        assert!(second.exam_path.ends_with("영어시험지_20240102_030405_2.txt"));
        assert!(second.answer_path.ends_with("영어시험지_답지_20240102_030405_2.txt"));
        assert_eq!(fs::read_to_string(&first.exam_path).await.unwrap(), "시험지");
        assert_eq!(fs::read_to_string(&first.answer_path).await.unwrap(), "정답");
        assert_eq!(
            fs::read_to_string(&second.exam_path).await.unwrap(),
            "두 번째 시험지"
        );
    }

    #[tokio::test]
    async fn test_deliver_fails_when_dir_is_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let writer = ExamWriter::new(file.path());

        let err = writer.deliver(&documents()).await.unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
