//! Resizer container markup and image measurements.

use image::ImageReader;
use std::io::Cursor;

/// Class of the outer span wrapping a resizable image
pub const CONTAINER_CLASS: &str = "markdown-img-container";

/// Class added to the inner span once the resizer is wired
pub const RESIZER_CLASS: &str = "markdown-img-resizer";

/// Class shared by all drag handles
pub const HANDLE_CLASS: &str = "resize-handle";

/// Pixel dimensions of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Container markup around an image: the image followed by right, bottom and
/// left drag handles
pub fn wrap_img_markup(src: &str, alt: &str) -> String {
    format!(
        concat!(
            r#"<span class="{container}">"#,
            r#"<span><img src="{src}" alt="{alt}">"#,
            r#"<i class="{handle} right"></i>"#,
            r#"<i class="{handle} bottom"></i>"#,
            r#"<i class="{handle} left"></i>"#,
            "</span></span>"
        ),
        container = CONTAINER_CLASS,
        handle = HANDLE_CLASS,
        src = escape_attr(src),
        alt = escape_attr(alt),
    )
}

/// Natural size of an encoded image
///
/// Only the header is read; the format is sniffed from the bytes.
pub fn natural_size(bytes: &[u8]) -> Result<ImageSize, crate::ResizeError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(ImageSize { width, height })
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    #[test]
    fn test_wrap_markup_has_three_handles() {
        let html = wrap_img_markup("https://img.example/a.png?x=1&y=2", "a \"quoted\" alt");
        assert!(html.starts_with(r#"<span class="markdown-img-container"><span><img"#));
        assert_eq!(html.matches(HANDLE_CLASS).count(), 3);
        assert!(html.contains(r#"src="https://img.example/a.png?x=1&amp;y=2""#));
        assert!(html.contains(r#"alt="a &quot;quoted&quot; alt""#));
        let right = html.find("right").unwrap();
        let bottom = html.find("bottom").unwrap();
        let left = html.find("left").unwrap();
        assert!(right < bottom && bottom < left);
    }

    #[test]
    fn test_natural_size_of_png() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(7, 3))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        assert_eq!(
            natural_size(&bytes).unwrap(),
            ImageSize {
                width: 7,
                height: 3
            }
        );
    }

    #[test]
    fn test_natural_size_rejects_garbage() {
        assert!(natural_size(b"definitely not an image").is_err());
    }
}
