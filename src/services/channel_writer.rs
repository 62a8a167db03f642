//! 消息频道服务 - 业务能力层
//!
//! 只负责"发出一条消息"能力，单条消息的长度由调用方控制

use std::future::Future;
use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 消息频道
pub trait MessageChannel: Send + Sync {
    fn post(&self, text: &str) -> impl Future<Output = AppResult<()>> + Send;
}

/// 写入频道文件的消息频道
///
/// 每条消息之间用分隔线隔开
pub struct ChannelWriter {
    channel_file_path: PathBuf,
}

impl ChannelWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            channel_file_path: path.into(),
        }
    }
}

impl MessageChannel for ChannelWriter {
    async fn post(&self, text: &str) -> AppResult<()> {
        debug!("发送消息: {} 字符", text.chars().count());

        let path = self.channel_file_path.display().to_string();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.channel_file_path)
            .await
            .map_err(|e| AppError::file_write_failed(&path, e))?;

        let message = format!("{}\n{}\n", text, "─".repeat(40));
        file.write_all(message.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(&path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_post_appends_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel.txt");
        let channel = ChannelWriter::new(&path);

        channel.post("first").await.unwrap();
        channel.post("second").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let first = content.find("first").unwrap();
        let second = content.find("second").unwrap();
        assert!(first < second);
        assert_eq!(content.matches(&"─".repeat(40)).count(), 2);
    }
}
