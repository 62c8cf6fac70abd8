//! # ALOFT Overlay
//!
//! Lifecycle engine for floating panels: menus, dropdown pickers and
//! tooltips that open next to an anchor and close on click-away, Escape,
//! or when the anchor scrolls out of view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       OverlayManager                        │
//! ├──────────────┬──────────────┬───────────────┬───────────────┤
//! │ Popover      │ Viewport     │ ClickAway     │ Listener      │
//! │ state machine│ Monitor      │ Gate          │ Registry      │
//! ├──────────────┴──────────────┴───────────────┴───────────────┤
//! │            aloft_geometry::solve (pure placement)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                LayerRenderer (host-provided)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//!
//! The engine never reads a clock. Every call takes a monotonic `now`;
//! hosts call [`OverlayManager::tick`] at [`OverlayManager::next_deadline`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod input;
pub mod kind;
pub mod layer;
pub mod listener;
pub mod manager;
pub mod measure;
pub mod popover;
pub mod timer;

pub use config::{
    ConfigLayer, ConfigResolver, ContainerId, PopoverConfig, ScrollContainer, Visibility,
};
pub use error::{OverlayError, OverlayResult};
pub use input::{InputEvent, Key, PointerEvent, PointerKind};
pub use kind::PanelKind;
pub use layer::{LayerId, LayerRenderer, MountStatus, SurfaceMode};
pub use listener::{ListenerGuard, ListenerKey, ListenerRegistry};
pub use manager::{Dispatch, OverlayManager};
pub use measure::{same_element, Measurable, MeasuredBox};
pub use popover::{
    ClickAwayGate, CloseCallback, CloseReason, GateVerdict, OpenRequest, PassKind, Popover,
    PopoverState, ViewportMonitor,
};
pub use timer::{Throttle, Timer};
