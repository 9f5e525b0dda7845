//! Backend image-url contract.
//!
//! The backend serves `GET /image-url/{image_id}?width={width}` and answers
//! `{"imageUrl": "..."}` with the URL of a rendition at that width. The HTTP
//! transport belongs to the embedding application; implement
//! [`ImageUrlService`] on top of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ResizeError;

/// Body of a successful image-url response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    pub image_url: String,
}

impl ImageUrlResponse {
    /// Decode a response body
    pub fn from_json(body: &str) -> Result<Self, ResizeError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Request path for a rendition of `image_id` at `width` pixels
pub fn image_url_path(image_id: &str, width: u32) -> String {
    format!("/image-url/{image_id}?width={width}")
}

/// Resolves image renditions
#[async_trait]
pub trait ImageUrlService: Send + Sync {
    /// URL of `image_id` rendered `width` pixels wide
    async fn image_url(&self, image_id: &str, width: u32) -> Result<String, ResizeError>;
}
