//! Image resizer for rendered markdown.
//!
//! Wiring is split the same way the widget is: the host finds images and
//! reports pointer events; the resizer decides which images are resizable,
//! runs the drag geometry and, on release, asks the image service for a new
//! rendition and applies it through an [`UpdateImageHook`].

use tracing::{debug, warn};

use crate::error::ResizeError;
use crate::geometry::{DragSession, DragStart};
use crate::links::{image_id_from_src, replace_link, ImageLinkMatcher};
use crate::service::ImageUrlService;
use crate::settings::ResizerSettings;

/// Per-root resizer options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeArgs {
    /// Reference layout width used to convert on-screen widths into request
    /// widths. `None` requests the on-screen width.
    pub design_width: Option<u32>,
    /// Only images served from this origin are resizable.
    pub origin: Option<String>,
}

/// How a finished resize is written back
pub enum UpdateImageHook<'a> {
    /// Rich-text editors: update the image element in place with
    /// `(img_src, new_url, width_ratio)`.
    Url(&'a mut (dyn FnMut(&str, &str, f64) + Send)),
    /// Plain textareas: rewrite the link inside the markdown source.
    Markdown(&'a mut String),
}

/// Resizes images inside one content root
#[derive(Debug, Clone)]
pub struct ImageResizer {
    args: ResizeArgs,
    settings: ResizerSettings,
    links: ImageLinkMatcher,
}

impl ImageResizer {
    pub fn new(args: ResizeArgs, settings: ResizerSettings) -> Result<Self, ResizeError> {
        let links = ImageLinkMatcher::new(args.origin.as_deref())?;
        Ok(Self {
            args,
            settings,
            links,
        })
    }

    pub fn args(&self) -> &ResizeArgs {
        &self.args
    }

    pub fn settings(&self) -> &ResizerSettings {
        &self.settings
    }

    /// Check whether an image should get drag handles
    ///
    /// Images already inside a resizer, and images from another origin when
    /// one is configured, are skipped. `already_wrapped` is true when an
    /// ancestor of the image carries [`RESIZER_CLASS`].
    ///
    /// [`RESIZER_CLASS`]: crate::markup::RESIZER_CLASS
    pub fn should_wire(&self, src: &str, already_wrapped: bool) -> bool {
        if already_wrapped {
            return false;
        }
        match &self.args.origin {
            Some(origin) => src.starts_with(origin.as_str()),
            None => true,
        }
    }

    /// Start a drag from a pointer-down on a handle
    pub fn begin_drag(&self, start: DragStart) -> DragSession {
        let session = DragSession::new(start, self.args.design_width, &self.settings);
        debug!(
            mode = ?session.mode(),
            root_width = session.root_width(),
            "Image resize started"
        );
        session
    }

    /// Finish a drag on pointer-up or cancel
    ///
    /// Returns whether the image was updated.
    pub async fn finish(
        &self,
        session: &DragSession,
        img_src: &str,
        hook: UpdateImageHook<'_>,
        service: &dyn ImageUrlService,
    ) -> Result<bool, ResizeError> {
        let Some(sample) = session.last_sample() else {
            debug!("Image resize released without movement");
            return Ok(false);
        };

        match hook {
            UpdateImageHook::Url(update) => {
                let image_id =
                    image_id_from_src(img_src).ok_or_else(|| ResizeError::MissingImageId {
                        src: img_src.to_string(),
                    })?;
                let url = service.image_url(image_id, sample.resize_width).await?;
                debug!(image_id, width = sample.resize_width, "Image URL updated");
                update(img_src, &url, sample.width_ratio);
                Ok(true)
            }
            UpdateImageHook::Markdown(text) => {
                let Some(link) = self.links.find_by_url(text, img_src) else {
                    warn!(src = img_src, "Resized image has no markdown link");
                    return Ok(false);
                };
                if link.alt.is_empty() {
                    debug!(src = img_src, "Skipping markdown link without alt text");
                    return Ok(false);
                }
                let url = service
                    .image_url(link.image_id, sample.resize_width)
                    .await?;
                let rewritten = replace_link(text, &link, &url);
                debug!(
                    image_id = link.image_id,
                    width = sample.resize_width,
                    "Markdown image link rewritten"
                );
                *text = rewritten;
                Ok(true)
            }
        }
    }
}
