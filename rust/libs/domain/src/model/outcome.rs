use crate::ports::ImageFetcherError;

/// 1回の取得試行の結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { bytes_written: u64 },
    TransportFailure(String),
    ServerFailure(u16),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

impl From<ImageFetcherError> for FetchOutcome {
    fn from(err: ImageFetcherError) -> Self {
        match err {
            ImageFetcherError::Transport(cause) => FetchOutcome::TransportFailure(cause),
            ImageFetcherError::Status(status) => FetchOutcome::ServerFailure(status),
        }
    }
}

/// 1レコードの終端状態。`Skipped` は保存先が既に存在した場合。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped,
    Attempted(FetchOutcome),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub total: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl FetchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Attempted(o) if o.is_success() => self.succeeded += 1,
            RecordOutcome::Attempted(_) => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_error_maps_to_outcome() {
        assert_eq!(
            FetchOutcome::from(ImageFetcherError::Status(404)),
            FetchOutcome::ServerFailure(404)
        );
        assert_eq!(
            FetchOutcome::from(ImageFetcherError::Transport("reset".to_string())),
            FetchOutcome::TransportFailure("reset".to_string())
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = FetchSummary::new(4);
        summary.record(&RecordOutcome::Skipped);
        summary.record(&RecordOutcome::Attempted(FetchOutcome::Success {
            bytes_written: 3,
        }));
        summary.record(&RecordOutcome::Attempted(FetchOutcome::ServerFailure(500)));
        summary.record(&RecordOutcome::Attempted(FetchOutcome::TransportFailure(
            "timeout".to_string(),
        )));

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total, 4);
    }
}
