//! Panel kinds supplied by the widget that owns the overlay.
//!
//! Widgets say what they are up front instead of the engine inspecting
//! them. The kind only picks defaults; it never changes the algorithm.

use aloft_geometry::Origin;

use crate::config::ConfigLayer;

/// What kind of widget a floating panel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelKind {
    /// Generic popover.
    #[default]
    Popover,
    /// Menu opened from an icon or button.
    Menu,
    /// Dropdown picker that covers its field.
    Dropdown,
    /// Tooltip rendered as a panel.
    Tooltip,
}

impl PanelKind {
    /// Default `(anchor_origin, target_origin)` pair.
    #[must_use]
    pub const fn default_origins(self) -> (Origin, Origin) {
        match self {
            Self::Popover => (Origin::BOTTOM_LEFT, Origin::TOP_LEFT),
            Self::Menu | Self::Dropdown => (Origin::TOP_LEFT, Origin::TOP_LEFT),
            Self::Tooltip => (Origin::BOTTOM_MIDDLE, Origin::TOP_MIDDLE),
        }
    }

    /// Config preset layered over the engine defaults.
    #[must_use]
    pub fn preset(self) -> ConfigLayer {
        match self {
            Self::Popover | Self::Menu => ConfigLayer::default(),
            Self::Dropdown => ConfigLayer {
                close_grace_ms: Some(300),
                ..ConfigLayer::default()
            },
            // Tooltips must not eat the click that dismisses them.
            Self::Tooltip => ConfigLayer {
                use_layer_for_click_away: Some(false),
                close_on_escape: Some(false),
                animated: Some(false),
                ..ConfigLayer::default()
            },
        }
    }
}
