use std::time::Duration;

/// 倍々で伸ばす回数の上限
const MAX_BACKOFF_DOUBLINGS: u32 = 8;

/// 1レコード内での再試行方針。既定では再試行しない。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
        }
    }

    /// `attempt` 回目 (0始まり) の失敗後に待つ時間
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.pow(attempt.min(MAX_BACKOFF_DOUBLINGS))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
