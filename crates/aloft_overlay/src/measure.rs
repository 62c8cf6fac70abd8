//! Measurement capability for anchors and panels.

use std::sync::Arc;

use aloft_geometry::BoundingBox;
use parking_lot::RwLock;

/// Anything whose on-screen box can be queried.
///
/// `None` means the element is not attached yet.
pub trait Measurable: Send + Sync {
    /// Current bounding box in viewport coordinates.
    fn bounding_box(&self) -> Option<BoundingBox>;
}

impl Measurable for BoundingBox {
    fn bounding_box(&self) -> Option<BoundingBox> {
        Some(*self)
    }
}

/// A box the host writes after each layout pass and the engine reads.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MeasuredBox {
    slot: Arc<RwLock<Option<BoundingBox>>>,
}

impl MeasuredBox {
    /// Creates an unattached box.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Creates a box already attached at the given bounds.
    #[must_use]
    pub fn attached(bounds: BoundingBox) -> Self {
        let measured = Self::default();
        measured.set(bounds);
        measured
    }

    /// Records a new layout result.
    pub fn set(&self, bounds: BoundingBox) {
        *self.slot.write() = Some(bounds);
    }

    /// Shifts the recorded box, as a scroll would.
    pub fn scroll_by(&self, dx: f32, dy: f32) {
        if let Some(bounds) = self.slot.write().as_mut() {
            *bounds = bounds.translate(-dx, -dy);
        }
    }

    /// Marks the element as detached.
    pub fn detach(&self) {
        *self.slot.write() = None;
    }

    /// Wraps a clone in a trait object for handing to the engine.
    #[must_use]
    pub fn handle(&self) -> Arc<dyn Measurable> {
        Arc::new(self.clone())
    }
}

impl Measurable for MeasuredBox {
    fn bounding_box(&self) -> Option<BoundingBox> {
        *self.slot.read()
    }
}

/// Returns true if both handles point at the same element.
#[must_use]
pub fn same_element(a: &Arc<dyn Measurable>, b: &Arc<dyn Measurable>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
