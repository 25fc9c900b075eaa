use crate::error::DomainError;

/// 取得対象の地点。入力テーブルの1行に対応する。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointRecord {
    id: i64,
    lat: f64,
    lon: f64,
}

impl PointRecord {
    /// 緯度・経度は有限値であること。範囲チェックは行わず、そのままプロバイダーへ渡す。
    pub fn new(id: i64, lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(DomainError::InvalidCoordinate { id, lat, lon });
        }
        Ok(Self { id, lat, lon })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_out_of_range_coordinates() {
        let point = PointRecord::new(1, 123.0, -500.0).unwrap();
        assert_eq!(point.lat(), 123.0);
        assert_eq!(point.lon(), -500.0);
    }

    #[test]
    fn test_new_rejects_non_finite_coordinates() {
        assert!(matches!(
            PointRecord::new(7, f64::NAN, 0.0),
            Err(DomainError::InvalidCoordinate { id: 7, .. })
        ));
        assert!(PointRecord::new(7, 0.0, f64::INFINITY).is_err());
    }
}
