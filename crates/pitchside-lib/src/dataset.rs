use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::db::load_catalog_near;
use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Environment variable that overrides the dataset location.
pub const DATASET_ENV_VAR: &str = "PITCHSIDE_DATASET";

/// Default filename for the cached catalog export.
const DATASET_FILENAME: &str = "catalog.json";

/// On-disk representation of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// JSON export with `players`, `games` and `fields` arrays.
    Json,
    /// SQLite snapshot with `players`, `games` and `fields` tables.
    Sqlite,
}

impl DatasetFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(DatasetFormat::Json),
            Some("db" | "sqlite" | "sqlite3") => Ok(DatasetFormat::Sqlite),
            _ => Err(Error::UnsupportedDataset {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "pitchside", "pitchside").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Pick the dataset path: explicit argument, then `PITCHSIDE_DATASET`, then
/// the platform data directory. The resolved file must exist.
pub fn resolve_dataset_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(DATASET_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_dataset_path()?,
        },
    };

    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }

    debug!(path = %path.display(), "resolved dataset path");
    Ok(path)
}

/// Load a full catalog from a JSON export or SQLite snapshot.
pub fn load_dataset(path: &Path) -> Result<Catalog> {
    load_dataset_near(path, None, f64::INFINITY)
}

/// Load a catalog, letting SQLite snapshots skip rows far from `reference`.
///
/// JSON exports are always read in full; the caller ranks the result either way.
pub fn load_dataset_near(
    path: &Path,
    reference: Option<Coordinate>,
    radius_km: f64,
) -> Result<Catalog> {
    let format = DatasetFormat::from_path(path)?;
    let catalog = match format {
        DatasetFormat::Json => Catalog::from_path(path)?,
        DatasetFormat::Sqlite => load_catalog_near(path, reference, radius_km)?,
    };

    info!(
        path = %path.display(),
        format = ?format,
        players = catalog.players.len(),
        games = catalog.games.len(),
        fields = catalog.fields.len(),
        "dataset loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_case_insensitively() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("catalog.JSON")).unwrap(),
            DatasetFormat::Json
        );
        for name in ["snap.db", "snap.sqlite", "snap.sqlite3"] {
            assert_eq!(
                DatasetFormat::from_path(Path::new(name)).unwrap(),
                DatasetFormat::Sqlite
            );
        }
    }

    #[test]
    fn rejects_unknown_extensions() {
        for name in ["catalog.csv", "catalog"] {
            assert!(matches!(
                DatasetFormat::from_path(Path::new(name)),
                Err(Error::UnsupportedDataset { .. })
            ));
        }
    }

    #[test]
    fn explicit_missing_path_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.json");
        let err = resolve_dataset_path(Some(&missing)).expect_err("missing file");
        assert!(matches!(err, Error::DatasetNotFound { path } if path == missing));
    }

    #[test]
    fn explicit_existing_path_wins() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("catalog.json");
        std::fs::write(&file, "{}").expect("write catalog");
        assert_eq!(resolve_dataset_path(Some(&file)).unwrap(), file);
    }

    #[test]
    fn default_path_lives_in_project_dirs() {
        if let Ok(path) = default_dataset_path() {
            assert!(path.ends_with(DATASET_FILENAME));
        }
    }
}
