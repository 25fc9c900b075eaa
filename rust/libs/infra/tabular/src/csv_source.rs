//! CSVファイルから取得対象の地点を読み込む

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use domain::{
    model::PointRecord,
    ports::{RecordSource, RecordSourceError},
};
use tracing::debug;

pub const ID_COLUMN: &str = "id";
pub const LAT_COLUMN: &str = "lat";
/// 入力フォーマットでは経度は `long` という列名
pub const LON_COLUMN: &str = "long";

/// 必須カラムの位置
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    lat: usize,
    lon: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, RecordSourceError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        match (
            position(ID_COLUMN),
            position(LAT_COLUMN),
            position(LON_COLUMN),
        ) {
            (Some(id), Some(lat), Some(lon)) => Ok(Self { id, lat, lon }),
            (id, lat, lon) => {
                let missing = [(ID_COLUMN, id), (LAT_COLUMN, lat), (LON_COLUMN, lon)]
                    .into_iter()
                    .filter(|(_, index)| index.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(RecordSourceError::MissingColumns(missing))
            }
        }
    }
}

pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ヘッダー行を検証してから全行を読み込む
    pub fn read_records<R: Read>(reader: R) -> Result<Vec<PointRecord>, RecordSourceError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| RecordSourceError::Read(e.to_string()))?
            .clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = index as u64 + 1;
            let record = result.map_err(|e| RecordSourceError::Read(e.to_string()))?;
            records.push(parse_point(&record, columns, row)?);
        }

        debug!(count = records.len(), "CSVの読み込みが完了しました");
        Ok(records)
    }
}

impl RecordSource for CsvRecordSource {
    fn load_records(&self) -> Result<Vec<PointRecord>, RecordSourceError> {
        debug!(path = %self.path.display(), "入力CSVを開きます");
        let file = std::fs::File::open(&self.path).map_err(|e| {
            RecordSourceError::Read(format!("{}: {}", self.path.display(), e))
        })?;
        Self::read_records(file)
    }
}

fn parse_point(
    record: &StringRecord,
    columns: ColumnIndex,
    row: u64,
) -> Result<PointRecord, RecordSourceError> {
    let field = |index: usize, name: &str| {
        record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| RecordSourceError::InvalidRow {
                row,
                message: format!("{} が空です", name),
            })
    };

    let id = parse_id(field(columns.id, ID_COLUMN)?).ok_or_else(|| {
        RecordSourceError::InvalidRow {
            row,
            message: format!("id を整数に変換できません: {:?}", record.get(columns.id)),
        }
    })?;
    let lat = parse_coordinate(field(columns.lat, LAT_COLUMN)?, LAT_COLUMN, row)?;
    let lon = parse_coordinate(field(columns.lon, LON_COLUMN)?, LON_COLUMN, row)?;

    PointRecord::new(id, lat, lon).map_err(|e| RecordSourceError::InvalidRow {
        row,
        message: e.to_string(),
    })
}

/// `42` のほか、表計算ソフトが出力しがちな `42.0` も受け付ける
fn parse_id(value: &str) -> Option<i64> {
    if let Ok(id) = value.parse::<i64>() {
        return Some(id);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

fn parse_coordinate(value: &str, name: &str, row: u64) -> Result<f64, RecordSourceError> {
    value
        .parse::<f64>()
        .map_err(|e| RecordSourceError::InvalidRow {
            row,
            message: format!("{} を数値に変換できません ({:?}): {}", name, value, e),
        })
}
