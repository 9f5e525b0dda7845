//! Pagewire Markdown
//!
//! Drag-to-resize support for images embedded in rendered markdown: handle
//! geometry, image-link matching and rewriting, and the backend contract for
//! requesting resized renditions.

pub mod error;
pub mod geometry;
pub mod links;
pub mod markup;
pub mod resizer;
pub mod service;
pub mod settings;

pub use error::ResizeError;
pub use geometry::{root_padding, DragMode, DragSession, DragStart, HandleKind, ResizeSample};
pub use links::{image_id_from_src, replace_link, ImageLink, ImageLinkMatcher};
pub use markup::{natural_size, wrap_img_markup, ImageSize};
pub use resizer::{ImageResizer, ResizeArgs, UpdateImageHook};
pub use service::{image_url_path, ImageUrlResponse, ImageUrlService};
pub use settings::ResizerSettings;
