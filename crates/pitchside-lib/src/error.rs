use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Pitchside library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when a dataset file extension is not one of the supported formats.
    #[error("unsupported dataset format for {path}; expected .json, .db, .sqlite or .sqlite3")]
    UnsupportedDataset { path: PathBuf },

    /// Raised when a SQLite snapshot lacks one of the expected tables.
    #[error("dataset is missing the `{table}` table")]
    MissingTable { table: String },

    /// Raised when a SQLite table lacks columns the loader needs.
    #[error("table `{table}` is missing required columns: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    /// Raised when a coordinate is outside the valid latitude/longitude range.
    #[error("invalid coordinate ({latitude}, {longitude}); latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when a coordinate string cannot be parsed as `lat,lon`.
    #[error("could not parse coordinate from '{input}'; expected 'LAT,LON'")]
    CoordinateParse { input: String },

    /// Raised when an entity kind name is not recognised.
    #[error("unknown entity kind: {name}; expected players, games or fields")]
    UnknownEntityKind { name: String },

    /// Raised when two records of the same kind share an identifier.
    #[error("duplicate {kind} id encountered: {id}")]
    DuplicateEntity { kind: String, id: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
