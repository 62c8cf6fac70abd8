//! The seam to whatever actually draws panels.
//!
//! The engine never touches a view tree. It asks a [`LayerRenderer`] to
//! mount, place, and unmount layers, and reads sizes back through
//! [`Measurable`].

use std::fmt;
use std::sync::Arc;

use aloft_geometry::Solution;

use crate::measure::Measurable;
use crate::popover::PopoverState;

/// Identifier of one floating layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Creates a new layer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// What sits under the panel while it is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    /// An invisible full-viewport surface beneath the panel that swallows
    /// interaction outside it.
    CaptureLayer,
    /// Nothing; interaction outside the panel reaches the UI below.
    Passive,
}

/// Outcome of a mount request.
pub enum MountStatus {
    /// The panel is in the tree and measurable now.
    Ready(Arc<dyn Measurable>),
    /// The panel will be reported through `mount_completed` later.
    Pending,
}

impl fmt::Debug for MountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::Pending => f.write_str("Pending"),
        }
    }
}

/// Mounts, places and unmounts panel content.
pub trait LayerRenderer {
    /// Starts mounting the layer's content.
    fn mount(&mut self, layer: LayerId, surface: SurfaceMode) -> MountStatus;

    /// Removes the layer's content from the tree.
    fn unmount(&mut self, layer: LayerId);

    /// Moves the panel to a freshly computed placement.
    fn place(&mut self, layer: LayerId, solution: &Solution);

    /// Notified on every lifecycle transition, e.g. to run an exit
    /// animation while `closing`.
    fn transition(&mut self, _layer: LayerId, _state: PopoverState) {}
}
