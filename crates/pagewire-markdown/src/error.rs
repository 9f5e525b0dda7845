//! Error types for the markdown image resizer.

use thiserror::Error;

/// Errors that can occur while resizing an embedded image.
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The image source carries no recognizable image id.
    #[error("No image id in source '{src}'")]
    MissingImageId { src: String },

    /// The image-url service failed.
    #[error("Image URL request for '{image_id}' failed: {reason}")]
    Service { image_id: String, reason: String },

    /// The image-url service answered with an unexpected body.
    #[error("Invalid image URL response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Image bytes could not be decoded.
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    /// The image link pattern could not be built.
    #[error("Invalid image link pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error while reading image bytes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResizeError {
    /// Create a service error
    pub fn service(image_id: impl Into<String>, reason: impl Into<String>) -> Self {
        ResizeError::Service {
            image_id: image_id.into(),
            reason: reason.into(),
        }
    }
}
