//! Drag-to-resize geometry.
//!
//! All values are CSS pixels in viewport coordinates, as reported by pointer
//! events and `getBoundingClientRect`.

use crate::settings::ResizerSettings;

/// Which resize handle the pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Left,
    Right,
    Bottom,
}

impl HandleKind {
    /// Classify a handle element by its class attribute
    ///
    /// `bottom` wins over `left`; anything else is a right handle.
    pub fn from_class_name(class_name: &str) -> Self {
        if class_name.contains("bottom") {
            HandleKind::Bottom
        } else if class_name.contains("left") {
            HandleKind::Left
        } else {
            HandleKind::Right
        }
    }

    /// Horizontal sign of the handle: -1 for left, 1 otherwise
    pub fn direction(self) -> f64 {
        match self {
            HandleKind::Left => -1.0,
            HandleKind::Right | HandleKind::Bottom => 1.0,
        }
    }
}

/// How pointer movement maps to a width change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Side handle: the image grows symmetrically, so dx counts twice.
    Side,
    /// Bottom handle: vertical movement scaled by the aspect ratio.
    Bottom,
    /// Side handle grabbed near the bottom edge: both axes contribute.
    Corner,
}

/// Snapshot taken when the pointer goes down on a handle
#[derive(Debug, Clone, PartialEq)]
pub struct DragStart {
    pub handle: HandleKind,
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// `clientWidth` of the content root
    pub root_client_width: f64,
    /// Horizontal padding of the content root, see [`root_padding`]
    pub root_padding: f64,
    /// Rendered image width
    pub image_width: f64,
    /// Rendered image bottom edge
    pub image_bottom: f64,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// Result of one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSample {
    /// New on-screen width of the image
    pub viewport_width: u32,
    /// Width to request from the image service
    pub resize_width: u32,
    /// `viewport_width` relative to the available root width
    pub width_ratio: f64,
}

/// An in-progress resize, from pointer down to pointer up
#[derive(Debug, Clone)]
pub struct DragSession {
    start: DragStart,
    mode: DragMode,
    direction: f64,
    aspect_ratio: f64,
    root_width: f64,
    min_width: f64,
    design_width: Option<u32>,
    last: Option<ResizeSample>,
}

impl DragSession {
    pub(crate) fn new(
        start: DragStart,
        design_width: Option<u32>,
        settings: &ResizerSettings,
    ) -> Self {
        let root_width = start.root_client_width - start.root_padding;
        let aspect_ratio = if start.natural_height == 0 {
            1.0
        } else {
            f64::from(start.natural_width) / f64::from(start.natural_height)
        };
        let mode = if start.handle == HandleKind::Bottom {
            DragMode::Bottom
        } else if start.image_bottom - start.pointer_y < settings.corner_zone_px {
            DragMode::Corner
        } else {
            DragMode::Side
        };

        Self {
            direction: start.handle.direction(),
            start,
            mode,
            aspect_ratio,
            root_width,
            min_width: settings.min_width,
            design_width,
            last: None,
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn start(&self) -> &DragStart {
        &self.start
    }

    /// Width available to the image inside the root
    pub fn root_width(&self) -> f64 {
        self.root_width
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Cursor to show on the handle for the duration of the drag
    pub fn cursor(&self) -> Option<&'static str> {
        match self.mode {
            DragMode::Corner if self.direction > 0.0 => Some("nwse-resize"),
            DragMode::Corner => Some("nesw-resize"),
            DragMode::Side | DragMode::Bottom => None,
        }
    }

    /// Apply a pointer move and return the new image width
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ResizeSample {
        let dx = x - self.start.pointer_x;
        let dy = y - self.start.pointer_y;
        let delta = match self.mode {
            DragMode::Corner => self.direction * dx + self.aspect_ratio * dy / 2.0,
            DragMode::Bottom => dy * self.aspect_ratio,
            DragMode::Side => self.direction * 2.0 * dx,
        };

        let viewport = js_round(clamp(
            self.start.image_width + delta,
            self.min_width,
            self.root_width,
        ));
        let resize = match self.design_width {
            Some(design) if self.root_width > 0.0 => {
                js_round(viewport * f64::from(design) / self.root_width)
            }
            _ => viewport,
        };
        let width_ratio = if self.root_width > 0.0 {
            viewport / self.root_width
        } else {
            0.0
        };

        let sample = ResizeSample {
            viewport_width: viewport as u32,
            resize_width: resize as u32,
            width_ratio,
        };
        self.last = Some(sample);
        sample
    }

    /// The most recent sample, `None` if the pointer never moved
    pub fn last_sample(&self) -> Option<ResizeSample> {
        self.last
    }
}

/// Horizontal padding of the content root from its computed style
///
/// Parses like `parseInt`, so `"12.5px"` counts as 12. When either side does
/// not parse the padding is 0.
pub fn root_padding(padding_left: &str, padding_right: &str) -> f64 {
    match (parse_css_int(padding_left), parse_css_int(padding_right)) {
        (Some(left), Some(right)) => left as f64 + right as f64,
        _ => 0.0,
    }
}

fn parse_css_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

// Lower bound wins when the bounds cross.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

// Rounds halves toward +inf, unlike f64::round.
fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}
