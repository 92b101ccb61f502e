//! Region structure for defining a patch window
//!
//! Coordinates are in pixels with (0,0) at the top-left corner of the image.

/// Window in pixel coordinates
///
/// Represents a rectangular area defined by its top-left corner and
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Square region of side `size` at (x, y)
    pub fn square(x: u32, y: u32, size: u32) -> Self {
        Region::new(x, y, size, size)
    }

    /// X-coordinate immediately after the rightmost pixel
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Y-coordinate immediately after the bottommost pixel
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the region lies entirely inside an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.end_x() <= width && self.end_y() <= height
    }
}
