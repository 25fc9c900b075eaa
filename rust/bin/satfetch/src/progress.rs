use domain::{model::FetchSummary, ports::ProgressReporter};
use tracing::info;

/// 進捗を `every` 件ごとにログへ出す
pub struct TracingProgressReporter {
    every: usize,
}

impl TracingProgressReporter {
    pub fn new(every: usize) -> Self {
        Self { every }
    }

    fn should_report(&self, done: usize, total: usize) -> bool {
        done == total || (self.every > 0 && done % self.every == 0)
    }
}

impl ProgressReporter for TracingProgressReporter {
    fn advance(&self, done: usize, total: usize) {
        if self.should_report(done, total) {
            info!(done, total, "衛星画像をダウンロード中 {}/{}", done, total);
        }
    }

    fn finish(&self, summary: &FetchSummary) {
        info!(
            skipped = summary.skipped,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "ダウンロード処理が終了しました"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report() {
        let reporter = TracingProgressReporter::new(10);

        assert!(!reporter.should_report(1, 25));
        assert!(reporter.should_report(10, 25));
        assert!(reporter.should_report(20, 25));
        assert!(reporter.should_report(25, 25));
    }

    #[test]
    fn test_zero_interval_reports_only_completion() {
        let reporter = TracingProgressReporter::new(0);

        assert!(!reporter.should_report(3, 5));
        assert!(reporter.should_report(5, 5));
    }
}
