use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinates were missing, malformed, or do not describe a box.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("could not read GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeoError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GeoError::InvalidInput(_))
    }
}
