use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DatasetFormat {
    Csv,
    Parquet,
}

impl DatasetFormat {
    /// `.parquet` and `.pq` are Parquet; everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("parquet" | "pq") => DatasetFormat::Parquet,
            _ => DatasetFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Parquet => "parquet",
        }
    }
}

/// Path to write when CSV is forced: a Parquet extension is swapped for `.csv`.
pub fn force_csv(path: &Path) -> PathBuf {
    match DatasetFormat::from_path(path) {
        DatasetFormat::Parquet => path.with_extension(DatasetFormat::Csv.extension()),
        DatasetFormat::Csv => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_picks_format() {
        assert_eq!(DatasetFormat::from_path(Path::new("assets.parquet")), DatasetFormat::Parquet);
        assert_eq!(DatasetFormat::from_path(Path::new("out/ASSETS.PQ")), DatasetFormat::Parquet);
        assert_eq!(DatasetFormat::from_path(Path::new("assets.csv")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("assets")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("assets.txt")), DatasetFormat::Csv);
    }

    #[test]
    fn forcing_csv_rewrites_parquet_extension_only() {
        assert_eq!(force_csv(Path::new("a.parquet")), PathBuf::from("a.csv"));
        assert_eq!(force_csv(Path::new("a.data")), PathBuf::from("a.data"));
    }
}
