//! # Overlay Configuration
//!
//! One immutable [`PopoverConfig`] per `open` call, resolved from layers:
//!
//! ```text
//! engine defaults → panel-kind preset → theme → theme[kind] → instance overrides
//! ```
//!
//! Themes are TOML:
//!
//! ```toml
//! [overlay]
//! close_grace_ms = 400
//!
//! [tooltip]
//! scrollable_container = { container = 7 }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{OverlayError, OverlayResult};
use crate::kind::PanelKind;

/// Identifier of a scrollable container in the host's view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

/// Which scroll source a panel tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollContainer {
    /// The global viewport.
    #[default]
    Viewport,
    /// A specific scrollable container.
    Container(ContainerId),
}

/// Who decides whether a requested close actually happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// The caller owns visibility; the engine only asks via
    /// `on_request_close` and never closes on its own.
    #[default]
    Controlled,
    /// The engine closes itself after notifying the caller.
    SelfManaged,
}

/// Resolved configuration for one open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopoverConfig {
    /// Run the `closing` grace window instead of unmounting at once.
    pub animated: bool,
    /// Correct placements that would overflow the viewport.
    pub can_auto_position: bool,
    /// Ask to close when the anchor scrolls out of view.
    pub auto_close_when_off_screen: bool,
    /// Put a capture surface under the panel for click-away.
    pub use_layer_for_click_away: bool,
    /// Scroll source to track.
    pub scrollable_container: ScrollContainer,
    /// Ask to close on Escape.
    pub close_on_escape: bool,
    /// Who honours close requests.
    pub visibility: Visibility,
    /// Length of the `closing` grace window.
    pub close_grace: Duration,
    /// Throttle window for scroll reaction.
    pub scroll_throttle: Duration,
    /// Throttle window for resize reaction.
    pub resize_throttle: Duration,
}

impl PopoverConfig {
    /// Default grace window, matching the exit transition.
    pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_millis(500);
    /// Default scroll throttle window.
    pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(50);
    /// Default resize throttle window.
    pub const DEFAULT_RESIZE_THROTTLE: Duration = Duration::from_millis(100);

    /// Checks values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidConfig`] for zero throttle windows.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.scroll_throttle.is_zero() {
            return Err(OverlayError::InvalidConfig(
                "scroll_throttle must be positive".into(),
            ));
        }
        if self.resize_throttle.is_zero() {
            return Err(OverlayError::InvalidConfig(
                "resize_throttle must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Returns a copy with every value present in `layer` applied.
    #[must_use]
    pub fn with_layer(mut self, layer: &ConfigLayer) -> Self {
        if let Some(v) = layer.animated {
            self.animated = v;
        }
        if let Some(v) = layer.can_auto_position {
            self.can_auto_position = v;
        }
        if let Some(v) = layer.auto_close_when_off_screen {
            self.auto_close_when_off_screen = v;
        }
        if let Some(v) = layer.use_layer_for_click_away {
            self.use_layer_for_click_away = v;
        }
        if let Some(v) = layer.scrollable_container {
            self.scrollable_container = v;
        }
        if let Some(v) = layer.close_on_escape {
            self.close_on_escape = v;
        }
        if let Some(v) = layer.visibility {
            self.visibility = v;
        }
        if let Some(ms) = layer.close_grace_ms {
            self.close_grace = Duration::from_millis(ms);
        }
        if let Some(ms) = layer.scroll_throttle_ms {
            self.scroll_throttle = Duration::from_millis(ms);
        }
        if let Some(ms) = layer.resize_throttle_ms {
            self.resize_throttle = Duration::from_millis(ms);
        }
        self
    }
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            animated: true,
            can_auto_position: true,
            auto_close_when_off_screen: true,
            use_layer_for_click_away: true,
            scrollable_container: ScrollContainer::Viewport,
            close_on_escape: true,
            visibility: Visibility::Controlled,
            close_grace: Self::DEFAULT_CLOSE_GRACE,
            scroll_throttle: Self::DEFAULT_SCROLL_THROTTLE,
            resize_throttle: Self::DEFAULT_RESIZE_THROTTLE,
        }
    }
}

/// A partial configuration; unset fields fall through to lower layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    /// See [`PopoverConfig::animated`].
    pub animated: Option<bool>,
    /// See [`PopoverConfig::can_auto_position`].
    pub can_auto_position: Option<bool>,
    /// See [`PopoverConfig::auto_close_when_off_screen`].
    pub auto_close_when_off_screen: Option<bool>,
    /// See [`PopoverConfig::use_layer_for_click_away`].
    pub use_layer_for_click_away: Option<bool>,
    /// See [`PopoverConfig::scrollable_container`].
    pub scrollable_container: Option<ScrollContainer>,
    /// See [`PopoverConfig::close_on_escape`].
    pub close_on_escape: Option<bool>,
    /// See [`PopoverConfig::visibility`].
    pub visibility: Option<Visibility>,
    /// Grace window in milliseconds.
    pub close_grace_ms: Option<u64>,
    /// Scroll throttle window in milliseconds.
    pub scroll_throttle_ms: Option<u64>,
    /// Resize throttle window in milliseconds.
    pub resize_throttle_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThemeFile {
    overlay: ConfigLayer,
    popover: Option<ConfigLayer>,
    menu: Option<ConfigLayer>,
    dropdown: Option<ConfigLayer>,
    tooltip: Option<ConfigLayer>,
}

/// Resolves the layered configuration for each open.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    theme: ConfigLayer,
    per_kind: HashMap<PanelKind, ConfigLayer>,
}

impl ConfigResolver {
    /// A resolver with no theme: defaults and kind presets only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the theme layers from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigParse`] for malformed TOML, unknown
    /// keys, or labels outside the allowed values.
    pub fn from_toml(source: &str) -> OverlayResult<Self> {
        let file: ThemeFile = toml::from_str(source)?;

        let per_kind = [
            (PanelKind::Popover, file.popover),
            (PanelKind::Menu, file.menu),
            (PanelKind::Dropdown, file.dropdown),
            (PanelKind::Tooltip, file.tooltip),
        ]
        .into_iter()
        .filter_map(|(kind, layer)| layer.map(|layer| (kind, layer)))
        .collect();

        Ok(Self {
            theme: file.overlay,
            per_kind,
        })
    }

    /// Sets the theme layer shared by every kind.
    #[must_use]
    pub fn with_theme(mut self, theme: ConfigLayer) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the theme layer for one kind.
    #[must_use]
    pub fn with_kind_theme(mut self, kind: PanelKind, layer: ConfigLayer) -> Self {
        self.per_kind.insert(kind, layer);
        self
    }

    /// Produces the configuration for one open.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidConfig`] if the merged result fails
    /// [`PopoverConfig::validate`].
    pub fn resolve(
        &self,
        kind: PanelKind,
        overrides: &ConfigLayer,
    ) -> OverlayResult<PopoverConfig> {
        let mut config = PopoverConfig::default()
            .with_layer(&kind.preset())
            .with_layer(&self.theme);
        if let Some(layer) = self.per_kind.get(&kind) {
            config = config.with_layer(layer);
        }
        let config = config.with_layer(overrides);
        config.validate()?;
        Ok(config)
    }
}
