use serde::{Deserialize, Serialize};

/// Outer size of the chart container in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Canvas-local pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scroll offsets of the main canvas box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

impl ScrollPosition {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Pixel extent of a scrollable area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest scroll offsets for a viewport of `view` inside this canvas.
    #[must_use]
    pub fn max_scroll(self, view: CanvasSize) -> ScrollPosition {
        ScrollPosition {
            left: (self.width - view.width).max(0.0),
            top: (self.height - view.height).max(0.0),
        }
    }

    /// Clamps `scroll` the way a native scroll container would.
    #[must_use]
    pub fn clamp_scroll(self, view: CanvasSize, scroll: ScrollPosition) -> ScrollPosition {
        let max = self.max_scroll(view);
        let left = if scroll.left.is_finite() { scroll.left } else { 0.0 };
        let top = if scroll.top.is_finite() { scroll.top } else { 0.0 };
        ScrollPosition {
            left: left.clamp(0.0, max.left),
            top: top.clamp(0.0, max.top),
        }
    }
}
