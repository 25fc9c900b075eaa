use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::DomainError;

/// 取得済み画像の保存先。
///
/// `put` は完全に書き込めたときだけファイルを残すこと。途中で終了しても
/// `exists` が中途半端なファイルを返してはならない。
#[async_trait]
pub trait ImageRepository {
    fn destination(&self, id: i64) -> PathBuf;

    async fn exists(&self, id: i64) -> Result<bool, DomainError>;

    /// 書き込んだバイト数を返す
    async fn put(&self, id: i64, data: &[u8]) -> Result<u64, DomainError>;
}
