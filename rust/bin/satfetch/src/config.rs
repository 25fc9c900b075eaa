use std::{path::PathBuf, time::Duration};

use clap::Parser;
use domain::{
    error::DomainError,
    model::{AccessToken, ImageSpec},
    usecase::{FetchSettings, RetryPolicy},
};
use http::{DEFAULT_BASE_URL, FetcherConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "MAPBOX_API_KEY が設定されていません。実行前に export MAPBOX_API_KEY='your_token_here' を実行してください"
    )]
    MissingAccessToken,

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// 地点一覧のCSVから衛星画像をまとめてダウンロードする
#[derive(Parser, Debug)]
#[command(name = "satfetch", version)]
pub struct Cli {
    /// 入力CSV (id, lat, long 列が必須)
    #[arg(short, long, default_value = "data/raw/test.csv")]
    pub input: PathBuf,

    /// 画像の保存先ディレクトリ
    #[arg(short, long, default_value = "data/images")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = "mapbox/satellite-v9")]
    pub style_id: String,

    #[arg(long, default_value_t = 18)]
    pub zoom: u8,

    #[arg(long, default_value_t = 224)]
    pub width: u32,

    #[arg(long, default_value_t = 224)]
    pub height: u32,

    /// `@2x` を付けずに等倍の画像を取得する
    #[arg(long)]
    pub no_high_dpi: bool,

    /// 1リクエストのタイムアウト (秒)
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// リクエスト間の待ち時間 (ミリ秒)
    #[arg(long, default_value_t = 100)]
    pub pacing_ms: u64,

    /// 通信エラー・429・5xx の再試行回数
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    #[arg(long, default_value_t = 500)]
    pub retry_backoff_ms: u64,

    /// 何件ごとに進捗をログに出すか
    #[arg(long, default_value_t = 10)]
    pub progress_every: usize,

    #[arg(long, env = "MAPBOX_API_KEY", hide_env_values = true)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub image_spec: ImageSpec,
    pub fetcher: FetcherConfig,
    pub settings: FetchSettings,
    pub progress_every: usize,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let token = cli.access_token.ok_or(ConfigError::MissingAccessToken)?;
        let access_token = AccessToken::new(token)?;

        let image_spec = ImageSpec {
            style_id: cli.style_id,
            zoom: cli.zoom,
            width: cli.width,
            height: cli.height,
            high_dpi: !cli.no_high_dpi,
            ..ImageSpec::new(access_token)
        };

        Ok(Self {
            input: cli.input,
            output_dir: cli.output_dir,
            image_spec,
            fetcher: FetcherConfig {
                base_url: cli.base_url,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            settings: FetchSettings {
                pacing_interval: Duration::from_millis(cli.pacing_ms),
                retry: RetryPolicy {
                    max_retries: cli.retries,
                    initial_backoff: Duration::from_millis(cli.retry_backoff_ms),
                },
            },
            progress_every: cli.progress_every,
        })
    }
}
