//! Boxes, sizes and coordinate maps in screen space.

use crate::error::{GeometryError, GeometryResult};

/// A bounding box in screen coordinates, as reported by a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// Top edge.
    pub top: f32,
    /// Left edge.
    pub left: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl BoundingBox {
    /// A zero-sized box at the origin.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new box.
    #[must_use]
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns true if the box has collapsed to nothing.
    ///
    /// Detached elements measure as all zeros.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    /// Returns true if the point is inside the box.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Returns a copy moved by the given offsets.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.top + dy, self.left + dx, self.width, self.height)
    }
}

/// Coordinates of the six named reference points of a box.
///
/// For an anchor these are absolute; for a panel they are local to the
/// panel's own top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionMap {
    /// Top edge.
    pub top: f32,
    /// Vertical median.
    pub center: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Left edge.
    pub left: f32,
    /// Horizontal median.
    pub middle: f32,
    /// Right edge.
    pub right: f32,
}

/// Snapshot of the anchor's box at measurement time.
///
/// Never mutated; a new measurement produces a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    bounds: BoundingBox,
}

impl AnchorRect {
    /// Captures an anchor measurement, rejecting collapsed boxes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyMeasurement`] for a zero-size box.
    pub fn capture(bounds: BoundingBox) -> GeometryResult<Self> {
        if bounds.is_empty() {
            return Err(GeometryError::EmptyMeasurement { what: "anchor" });
        }
        Ok(Self { bounds })
    }

    /// The measured box.
    #[must_use]
    pub const fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.bounds.top
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.bounds.left
    }
}

/// The panel's own size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetSize {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl TargetSize {
    /// Creates a target size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Takes the size of a measured panel, rejecting collapsed boxes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyMeasurement`] for a zero-size box.
    pub fn capture(bounds: BoundingBox) -> GeometryResult<Self> {
        if bounds.is_empty() {
            return Err(GeometryError::EmptyMeasurement { what: "panel" });
        }
        Ok(Self::new(bounds.width, bounds.height))
    }
}

/// Absolute offset to apply to the panel's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    /// Offset from the viewport top.
    pub top: f32,
    /// Offset from the viewport left.
    pub left: f32,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// Size of the visible area panels must fit into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible width.
    pub width: f32,
    /// Visible height.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if the point lies inside the closed viewport range.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}
