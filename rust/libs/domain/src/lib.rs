//! 衛星画像取得のドメイン層
//!
//! 入力レコードの読み込み・画像の取得・保存はポートとして定義し、
//! 再開可能な取得ループ本体は [`usecase`] に置く。

pub mod error;
pub mod model;
pub mod ports;
pub mod repository;
pub mod usecase;
