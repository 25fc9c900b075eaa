use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::{error::DomainError, model::Destination, repository::ImageRepository};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("出力ディレクトリ '{path}' の作成に失敗しました: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' への書き込みに失敗しました: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' の確認に失敗しました: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn write(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
        let path = path.to_path_buf();
        move |source| StorageError::Write { path, source }
    }

    fn into_domain(self, id: i64) -> DomainError {
        DomainError::Storage {
            id,
            message: self.to_string(),
        }
    }
}

/// 出力ディレクトリに `<id>.jpg` として画像を保存する。
///
/// 一時ファイルに書き込んでから rename するので、途中で落ちても
/// 保存先には完全なファイルか何もないかのどちらかしか残らない。
#[derive(Clone, Debug)]
pub struct FsImageRepository {
    output_dir: PathBuf,
}

impl FsImageRepository {
    /// 出力ディレクトリがなければ作成する
    pub async fn create(output_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: output_dir.clone(),
                source,
            })?;
        info!(path = %output_dir.display(), "出力ディレクトリを準備しました");
        Ok(Self { output_dir })
    }

    fn temp_path(&self, id: i64) -> PathBuf {
        self.output_dir.join(format!(".{}.jpg.part", id))
    }

    async fn write_atomically(&self, id: i64, data: &[u8]) -> Result<u64, StorageError> {
        let destination = self.destination(id);
        let temp_path = self.temp_path(id);

        let result = match write_synced(&temp_path, data).await {
            Ok(()) => fs::rename(&temp_path, &destination)
                .await
                .map_err(StorageError::write(&destination)),
            Err(e) => Err(StorageError::write(&temp_path)(e)),
        };

        // どの段階で失敗しても一時ファイルは残さない
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result.map(|()| data.len() as u64)
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[async_trait]
impl ImageRepository for FsImageRepository {
    fn destination(&self, id: i64) -> PathBuf {
        Destination::for_id(&self.output_dir, id).into()
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let path = self.destination(id);
        fs::try_exists(&path)
            .await
            .map_err(|source| StorageError::Stat { path, source }.into_domain(id))
    }

    async fn put(&self, id: i64, data: &[u8]) -> Result<u64, DomainError> {
        let written = self
            .write_atomically(id, data)
            .await
            .map_err(|e| e.into_domain(id))?;
        debug!(id, written, "画像ファイルを書き込みました");
        Ok(written)
    }
}
