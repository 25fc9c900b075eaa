use std::path::{Path, PathBuf};

/// 保存先ファイルの拡張子
pub const IMAGE_EXTENSION: &str = "jpg";

/// レコードIDから一意に決まる保存先パス (`<output_dir>/<id>.jpg`)。
///
/// このファイルの有無だけが取得済みかどうかを表す。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination(PathBuf);

impl Destination {
    pub fn for_id(output_dir: &Path, id: i64) -> Self {
        Self(output_dir.join(format!("{}.{}", id, IMAGE_EXTENSION)))
    }
}

impl From<Destination> for PathBuf {
    fn from(val: Destination) -> Self {
        val.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_depends_only_on_id() {
        let dir = Path::new("data/images");
        assert_eq!(
            PathBuf::from(Destination::for_id(dir, 42)),
            Path::new("data/images/42.jpg")
        );
        assert_eq!(
            PathBuf::from(Destination::for_id(dir, -3)),
            Path::new("data/images/-3.jpg")
        );
    }
}
