use thiserror::Error;

/// Errors that can occur while configuring a render or exporting its image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown sample type: {0}")]
    UnknownSampleType(String),

    #[error("Film has no samples to export")]
    EmptyFilm,
}

pub type RenderResult<T> = Result<T, RenderError>;
