use anyhow::Context as _;
use domain::{
    model::FetchSummary,
    ports::RecordSource,
    usecase::{SatelliteImageFetchUseCase, SatelliteImageFetchUseCaseImpl},
};
use http::ReqwestImageFetcher;
use storage::FsImageRepository;
use tabular::CsvRecordSource;
use tracing::info;

use crate::{config::Config, progress::TracingProgressReporter};

/// 入力を検証してから出力ディレクトリを用意し、全レコードを処理する。
///
/// スキーマエラーなど入力の問題ではディレクトリも作らずに終了する。
pub async fn run(config: Config) -> anyhow::Result<FetchSummary> {
    let fetcher = ReqwestImageFetcher::new(config.image_spec, config.fetcher)
        .context("画像取得クライアントの初期化に失敗しました")?;

    let source = CsvRecordSource::from_path(&config.input);
    let records = source
        .load_records()
        .with_context(|| format!("入力CSV '{}' を読み込めません", source.path().display()))?;
    info!(
        total = records.len(),
        path = %source.path().display(),
        "入力レコードを読み込みました"
    );

    let repository = FsImageRepository::create(&config.output_dir).await?;

    let usecase = SatelliteImageFetchUseCaseImpl::new(
        fetcher,
        repository,
        TracingProgressReporter::new(config.progress_every),
        config.settings,
    );

    let summary = usecase
        .fetch_all(&records)
        .await
        .context("画像の保存に失敗したため処理を中断しました")?;
    Ok(summary)
}
