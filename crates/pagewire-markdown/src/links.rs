//! Markdown image links pointing at the image service.
//!
//! A resizable link looks like `![alt](<origin>...?path=<image id>...)`, where
//! the image id is `<kind>:<12 alnum>:<8 alnum>.<ext>`.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

use crate::error::ResizeError;

const IMAGE_ID: &str = r"[a-z]\w+:[a-z0-9]{12}:[a-z0-9]{8}\.\w{3,4}";

/// Origin prefix used when the resizer is not bound to one
pub const DEFAULT_ORIGIN_PREFIX: &str = "http";

/// An image link found in markdown text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink<'a> {
    /// Alt text between the brackets
    pub alt: &'a str,
    /// Full link target
    pub url: &'a str,
    /// Image id taken from the `path` query parameter
    pub image_id: &'a str,
    /// Byte range of the whole `![alt](url)` link
    pub range: Range<usize>,
}

/// Finds image-service links for one origin
#[derive(Debug, Clone)]
pub struct ImageLinkMatcher {
    regex: Regex,
}

impl ImageLinkMatcher {
    /// Build a matcher for links under `origin`, or any `http` URL
    pub fn new(origin: Option<&str>) -> Result<Self, ResizeError> {
        let prefix = regex::escape(origin.unwrap_or(DEFAULT_ORIGIN_PREFIX));
        let pattern = format!(
            r"(?i)!\[([^\n\]]*)\]\(({prefix}[^)\s]+[?&]path=({IMAGE_ID})[^)]*)\)"
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Every matching link in `text`, in order
    pub fn links<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ImageLink<'a>> + 'a {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(ImageLink {
                alt: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
                image_id: caps.get(3)?.as_str(),
                range: whole.range(),
            })
        })
    }

    /// The first link whose target is exactly `url`
    pub fn find_by_url<'a>(&'a self, text: &'a str, url: &str) -> Option<ImageLink<'a>> {
        self.links(text).find(|link| link.url == url)
    }
}

/// Replace `link` in `text` with the same alt text pointing at `new_url`
pub fn replace_link(text: &str, link: &ImageLink<'_>, new_url: &str) -> String {
    let mut out = String::with_capacity(text.len() + new_url.len());
    out.push_str(&text[..link.range.start]);
    out.push_str("![");
    out.push_str(link.alt);
    out.push_str("](");
    out.push_str(new_url);
    out.push(')');
    out.push_str(&text[link.range.end..]);
    out
}

/// Extract the image id from a rendered image source
///
/// The id must appear as a `&path=<id>&` query parameter.
pub fn image_id_from_src(src: &str) -> Option<&str> {
    static IMAGE_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = IMAGE_ID_REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?i)&path=({IMAGE_ID})&")).expect("invalid image id regex")
    });
    regex
        .captures(src)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
