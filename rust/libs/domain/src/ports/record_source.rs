use thiserror::Error;

use crate::model::PointRecord;

#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("必須カラムがありません: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("入力の読み込みに失敗: {0}")]
    Read(String),

    #[error("{row}行目の値が不正です: {message}")]
    InvalidRow { row: u64, message: String },
}

/// 取得対象の地点を入力順に返す。
///
/// スキーマが不足している場合はリクエストを1件も送る前にエラーを返すこと。
pub trait RecordSource {
    fn load_records(&self) -> Result<Vec<PointRecord>, RecordSourceError>;
}
