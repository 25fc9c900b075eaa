use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::model::PointRecord;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ImageFetcherError {
    #[error("画像リクエストに失敗: {0}")]
    Transport(String),

    #[error("サーバーがエラーを返しました: status={0}")]
    Status(u16),
}

impl ImageFetcherError {
    /// 再試行で回復し得るか (通信エラー・429・5xx)
    pub fn is_retryable(&self) -> bool {
        match self {
            ImageFetcherError::Transport(_) => true,
            ImageFetcherError::Status(status) => *status == 429 || (500..600).contains(status),
        }
    }
}

/// 1地点分の画像を1回だけ取得する。再試行は呼び出し側の責務。
#[async_trait]
pub trait ImageFetcher {
    async fn fetch_image(&self, point: &PointRecord) -> Result<Bytes, ImageFetcherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ImageFetcherError::Transport("timeout".to_string()).is_retryable());
        assert!(ImageFetcherError::Status(429).is_retryable());
        assert!(ImageFetcherError::Status(503).is_retryable());
        assert!(!ImageFetcherError::Status(404).is_retryable());
        assert!(!ImageFetcherError::Status(401).is_retryable());
    }
}
