use thiserror::Error;

/// Errors raised while loading boundary data or sampling a map.
///
/// Empty selections and out-of-range latitudes are not errors: they are
/// handled by returning an empty point set and by clamping respectively.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("feature `{id}` has unsupported geometry type `{kind}`")]
    UnsupportedGeometry { id: String, kind: &'static str },

    #[error("feature `{id}` has no geometry")]
    MissingGeometry { id: String },

    #[error("feature #{index} has no identifier")]
    MissingId { index: usize },

    #[error("ring in feature `{id}` has {points} positions, at least 3 are required")]
    InvalidRing { id: String, points: usize },

    #[error("boundary dataset is not a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    #[error("failed to parse boundary dataset: {0}")]
    Parse(#[from] simd_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("grid needs at least 2 rows and 2 columns, got {rows}x{columns}")]
    DegenerateGrid { rows: usize, columns: usize },

    #[error("canvas of {width}x{height} leaves no room to sample")]
    DegenerateCanvas { width: f64, height: f64 },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
