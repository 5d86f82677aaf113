use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutpaintError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Unknown aspect ratio: {label}")]
    NotFound { label: String },

    #[error("Aspect ratio {label} cannot be resolved within {budget} pixels")]
    Unresolvable { label: String, budget: u64 },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutpaintError>;
