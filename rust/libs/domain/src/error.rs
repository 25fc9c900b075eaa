use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("座標が不正です: id={id}, lat={lat}, lon={lon}")]
    InvalidCoordinate { id: i64, lat: f64, lon: f64 },

    #[error("画像の保存に失敗: id={id}: {message}")]
    Storage { id: i64, message: String },

    #[error("設定が不正です: {0}")]
    InvalidConfig(String),
}
