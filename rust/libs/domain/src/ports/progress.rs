use crate::model::FetchSummary;

/// 進捗の通知先。`done` は単調増加し、最後に `total` に達する。
pub trait ProgressReporter {
    fn advance(&self, done: usize, total: usize);

    fn finish(&self, _summary: &FetchSummary) {}
}
