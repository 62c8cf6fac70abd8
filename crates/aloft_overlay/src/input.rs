//! Input events fed to the overlay engine.
//!
//! Hosts translate their platform events into these and hand them to
//! [`OverlayManager::dispatch`](crate::OverlayManager::dispatch).

use aloft_geometry::Viewport;

use crate::config::ScrollContainer;

/// What produced a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse press.
    Mouse,
    /// Touch start.
    Touch,
}

/// Keyboard keys delivered to the overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape; closes the topmost panel when `close_on_escape` is set.
    Escape,
    /// Enter; left to the panel content.
    Enter,
}

/// A press/click at a viewport position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Source of the interaction.
    pub kind: PointerKind,
    /// Set when something upstream already handled the event; the
    /// click-away gate ignores it.
    pub default_prevented: bool,
}

impl PointerEvent {
    /// A mouse click at the given position.
    #[must_use]
    pub const fn click(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Mouse,
            default_prevented: false,
        }
    }

    /// A touch start at the given position.
    #[must_use]
    pub const fn touch(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Touch,
            default_prevented: false,
        }
    }

    /// Marks the event as already handled.
    #[must_use]
    pub const fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// One discrete event from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer interaction.
    Pointer(PointerEvent),
    /// A scrollable container moved its content.
    Scroll(ScrollContainer),
    /// The viewport changed size.
    Resize(Viewport),
    /// A key was pressed.
    Key(Key),
}
