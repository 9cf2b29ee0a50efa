//! Error Types
//!
//! Every failure the UI can hit. All variants are recoverable and end up
//! as a notice in application state.

use thiserror::Error;

/// Reading GPS coordinates out of an image failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("image is not a base64 data URL")]
    InvalidDataUrl,

    #[error("image data is not valid base64: {0}")]
    Decode(String),

    #[error("could not read EXIF metadata: {0}")]
    Exif(String),

    #[error("image has no GPS location tag")]
    NoGpsData,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Request could not be sent or returned a non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// Response was not the JSON shape we asked for
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Too many images: at most {max} can be selected")]
    TooManyImages { max: usize },

    #[error("Image index {index} out of range (total: {len})")]
    ImageIndexOutOfRange { index: usize, len: usize },

    #[error("File read error: {0}")]
    FileRead(String),
}

impl AppError {
    /// Short label for the notice bar
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Network(_) => "Network",
            AppError::Protocol(_) => "Server response",
            AppError::Metadata(_) => "Photo location",
            AppError::TooManyImages { .. } | AppError::ImageIndexOutOfRange { .. } => "Selection",
            AppError::FileRead(_) => "File",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Protocol(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
