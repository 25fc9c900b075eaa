use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use domain::{
    model::{ImageSpec, PointRecord},
    ports::{ImageFetcher, ImageFetcherError},
};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/styles/v1";

#[derive(Debug, Error)]
pub enum HttpFetcherError {
    #[error("HTTPクライアントの構築に失敗: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("ベースURLが不正です: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    pub base_url: String,
    /// 1リクエストあたりのタイムアウト
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// 静的画像APIから1地点分の画像を取得する
///
/// `{base}/{style_id}/static/{lon},{lat},{zoom}/{width}x{height}@2x?access_token=...`
pub struct ReqwestImageFetcher {
    client: Client,
    base_url: Url,
    spec: ImageSpec,
}

impl ReqwestImageFetcher {
    pub fn new(spec: ImageSpec, config: FetcherConfig) -> Result<Self, HttpFetcherError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| HttpFetcherError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpFetcherError::InvalidBaseUrl(config.base_url));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            spec,
        })
    }

    pub fn request_url(&self, point: &PointRecord) -> Url {
        let mut url = self.tile_url(point);
        url.query_pairs_mut()
            .append_pair("access_token", self.spec.access_token.expose());
        url
    }

    /// ログ出力用。アクセストークンを伏せる。
    pub fn redacted_url(&self, point: &PointRecord) -> String {
        format!("{}?access_token=***", self.tile_url(point))
    }

    fn tile_url(&self, point: &PointRecord) -> Url {
        let spec = &self.spec;
        let center = format!("{},{},{}", point.lon(), point.lat(), spec.zoom);
        let size = format!(
            "{}x{}{}",
            spec.width,
            spec.height,
            if spec.high_dpi { "@2x" } else { "" }
        );

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(spec.style_id.split('/').filter(|s| !s.is_empty()))
                .push("static")
                .push(&center)
                .push(&size);
        }
        url
    }
}

#[async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch_image(&self, point: &PointRecord) -> Result<Bytes, ImageFetcherError> {
        debug!(id = point.id(), url = %self.redacted_url(point), "画像を取得します");

        // reqwest のエラーにはURL (トークン込み) が含まれるので外す
        let response = self
            .client
            .get(self.request_url(point))
            .send()
            .await
            .map_err(|e| ImageFetcherError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(id = point.id(), status = status.as_u16(), "エラーステータスを受信しました");
            return Err(ImageFetcherError::Status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| ImageFetcherError::Transport(e.without_url().to_string()))
    }
}
