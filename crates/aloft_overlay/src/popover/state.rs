//! Lifecycle states and close reasons.

use std::fmt;

/// Where an instance is in its open/close lifecycle.
///
/// ```text
///            request_open              placed
///  CLOSED ──────────────► OPENING ───────────► OPEN
///    ▲  ▲                    │                 │  ▲
///    │  └──── request_close ─┘   request_close │  │ request_open
///    │                          (animated)     ▼  │
///    └────────── grace expired ────────────── CLOSING
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PopoverState {
    /// Nothing mounted.
    #[default]
    Closed,
    /// Mount requested; not yet placed.
    Opening,
    /// Mounted, placed, visible.
    Open,
    /// Exit animation running; unmounts when the grace window ends.
    Closing,
}

impl PopoverState {
    /// Label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for PopoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the engine is asking the caller to close.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Interaction outside the panel.
    ClickAway,
    /// The anchor left the viewport.
    OffScreen,
    /// Escape pressed while the panel was topmost.
    Escape,
    /// Caller-defined reason.
    Custom(String),
}

impl CloseReason {
    /// Wire label: `clickAway`, `offScreen`, `escape`, or the custom text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ClickAway => "clickAway",
            Self::OffScreen => "offScreen",
            Self::Escape => "escape",
            Self::Custom(reason) => reason,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CloseReason {
    fn from(label: &str) -> Self {
        match label {
            "clickAway" => Self::ClickAway,
            "offScreen" => Self::OffScreen,
            "escape" => Self::Escape,
            other => Self::Custom(other.to_owned()),
        }
    }
}
