use std::fmt;

use crate::error::DomainError;

/// プロバイダーのアクセストークン。ログに出さないよう `Debug` では伏せる。
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "アクセストークンが空です".to_string(),
            ));
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// 取得する画像のスタイル・ズーム・サイズ
#[derive(Clone, Debug)]
pub struct ImageSpec {
    pub style_id: String,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    /// `@2x` の高解像度画像を要求する
    pub high_dpi: bool,
    pub access_token: AccessToken,
}

impl ImageSpec {
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            style_id: "mapbox/satellite-v9".to_string(),
            zoom: 18,
            width: 224,
            height: 224,
            high_dpi: true,
            access_token,
        }
    }
}
