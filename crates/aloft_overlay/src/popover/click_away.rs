//! Click-away detection.
//!
//! Two modes, picked by `use_layer_for_click_away`:
//! - capture layer: an invisible surface under the panel catches the
//!   interaction so nothing beneath sees it
//! - passive: the interaction is observed and passed through

use aloft_geometry::BoundingBox;

use crate::input::PointerEvent;
use crate::layer::{LayerId, SurfaceMode};
use crate::listener::{ListenerGuard, ListenerKey, ListenerRegistry};

/// How a pointer event relates to an armed gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    /// Gate not armed; the event means nothing to this panel.
    Unarmed,
    /// Panel box unknown, so inside/outside cannot be decided.
    Unmeasured,
    /// The capture surface is mounted but the panel is not open yet. The
    /// event is swallowed and no close is requested.
    Blocked,
    /// The event landed on the panel.
    Inside,
    /// The event landed outside the panel.
    Outside {
        /// A close should be requested.
        close: bool,
        /// The capture layer ate the event.
        swallowed: bool,
    },
}

/// Click-away detector for one instance.
#[derive(Debug)]
pub struct ClickAwayGate {
    mode: SurfaceMode,
    guard: Option<ListenerGuard>,
}

impl ClickAwayGate {
    /// Creates a disarmed gate.
    #[must_use]
    pub const fn new(mode: SurfaceMode) -> Self {
        Self { mode, guard: None }
    }

    /// Picks the mode from the config flag.
    #[must_use]
    pub const fn mode_for(use_layer: bool) -> SurfaceMode {
        if use_layer {
            SurfaceMode::CaptureLayer
        } else {
            SurfaceMode::Passive
        }
    }

    /// Operating mode.
    #[must_use]
    pub const fn mode(&self) -> SurfaceMode {
        self.mode
    }

    /// Starts listening for pointer events.
    pub fn arm(&mut self, registry: &ListenerRegistry, layer: LayerId) {
        if self.guard.is_none() {
            self.guard = Some(registry.subscribe(ListenerKey::Pointer, layer));
        }
    }

    /// Stops listening.
    pub fn disarm(&mut self) {
        self.guard = None;
    }

    /// Returns true while listening.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.guard.is_some()
    }

    /// Classifies a pointer event against the panel box.
    #[must_use]
    pub fn evaluate(&self, panel: Option<BoundingBox>, event: &PointerEvent) -> GateVerdict {
        if !self.is_armed() {
            return GateVerdict::Unarmed;
        }
        let Some(panel) = panel else {
            return GateVerdict::Unmeasured;
        };
        if panel.contains(event.x, event.y) {
            return GateVerdict::Inside;
        }

        GateVerdict::Outside {
            close: !event.default_prevented,
            swallowed: self.mode == SurfaceMode::CaptureLayer,
        }
    }
}
