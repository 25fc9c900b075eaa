use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::{
    error::DomainError,
    model::{FetchOutcome, FetchSummary, PointRecord, RecordOutcome},
    ports::{ImageFetcher, ImageFetcherError, ProgressReporter},
    repository::ImageRepository,
    usecase::RetryPolicy,
};

#[derive(Clone, Debug)]
pub struct FetchSettings {
    /// 実際にリクエストを送った後に待つ時間。スキップ時は待たない。
    pub pacing_interval: Duration,
    pub retry: RetryPolicy,
}

#[async_trait]
pub trait SatelliteImageFetchUseCase {
    async fn fetch_all(&self, records: &[PointRecord]) -> Result<FetchSummary, DomainError>;
}

/// 地点一覧を順に処理し、未取得の画像だけを取得して保存する。
///
/// 保存先が既にあるレコードはスキップするので、同じ出力先で何度実行しても
/// 前回の続きから再開できる。個々の取得失敗はログに残して次へ進み、
/// 保存の失敗だけが実行全体を止める。
pub struct SatelliteImageFetchUseCaseImpl<F, R, P>
where
    F: ImageFetcher + Send + Sync,
    R: ImageRepository + Send + Sync,
    P: ProgressReporter + Send + Sync,
{
    image_fetcher: F,
    image_repository: R,
    progress: P,
    settings: FetchSettings,
}

impl<F, R, P> SatelliteImageFetchUseCaseImpl<F, R, P>
where
    F: ImageFetcher + Send + Sync,
    R: ImageRepository + Send + Sync,
    P: ProgressReporter + Send + Sync,
{
    pub fn new(
        image_fetcher: F,
        image_repository: R,
        progress: P,
        settings: FetchSettings,
    ) -> Self {
        Self {
            image_fetcher,
            image_repository,
            progress,
            settings,
        }
    }

    pub async fn process_record(&self, record: &PointRecord) -> Result<RecordOutcome, DomainError> {
        let id = record.id();
        if self.image_repository.exists(id).await? {
            debug!(id, "取得済みのためスキップします");
            return Ok(RecordOutcome::Skipped);
        }

        let outcome = self.fetch_with_retry(record).await?;
        Ok(RecordOutcome::Attempted(outcome))
    }

    async fn fetch_with_retry(&self, record: &PointRecord) -> Result<FetchOutcome, DomainError> {
        let (id, lat, lon) = (record.id(), record.lat(), record.lon());
        let retry = self.settings.retry;
        let mut attempt = 0;

        loop {
            match self.image_fetcher.fetch_image(record).await {
                Ok(data) => {
                    let bytes_written = self.image_repository.put(id, &data).await?;
                    debug!(
                        id,
                        bytes_written,
                        path = %self.image_repository.destination(id).display(),
                        "画像を保存しました"
                    );
                    return Ok(FetchOutcome::Success { bytes_written });
                }
                Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                    let delay = retry.backoff(attempt);
                    attempt += 1;
                    warn!(
                        id,
                        lat,
                        lon,
                        attempt,
                        delay = ?delay,
                        "画像の取得に失敗したため再試行します: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    match &e {
                        ImageFetcherError::Transport(cause) => {
                            error!(id, lat, lon, "リクエストエラー @ ({}, {}): {}", lat, lon, cause);
                        }
                        ImageFetcherError::Status(status) => {
                            error!(id, lat, lon, status, "取得失敗 [{}] @ ({}, {})", status, lat, lon);
                        }
                    }
                    return Ok(e.into());
                }
            }
        }
    }
}

#[async_trait]
impl<F, R, P> SatelliteImageFetchUseCase for SatelliteImageFetchUseCaseImpl<F, R, P>
where
    F: ImageFetcher + Send + Sync,
    R: ImageRepository + Send + Sync,
    P: ProgressReporter + Send + Sync,
{
    async fn fetch_all(&self, records: &[PointRecord]) -> Result<FetchSummary, DomainError> {
        let total = records.len();
        let mut summary = FetchSummary::new(total);

        for (index, record) in records.iter().enumerate() {
            let outcome = self.process_record(record).await?;
            summary.record(&outcome);
            self.progress.advance(index + 1, total);

            let pacing = self.settings.pacing_interval;
            if matches!(outcome, RecordOutcome::Attempted(_)) && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
        }

        self.progress.finish(&summary);
        Ok(summary)
    }
}
