//! # Overlay Manager
//!
//! Top-level controller for one window's floating panels.
//!
//! ```text
//!            InputEvent
//!                │
//!       ┌────────▼───────┐     ┌──────────────────┐
//!       │ OverlayManager │────►│ ListenerRegistry │
//!       └────────┬───────┘     └──────────────────┘
//!                │ topmost first
//!   ┌────────────┼────────────┐
//!   ▼            ▼            ▼
//! Popover      Popover      Popover ──► LayerRenderer
//! ```
//!
//! Managers share nothing, so several can run side by side.

use std::sync::Arc;
use std::time::Duration;

use aloft_geometry::Viewport;

use crate::config::{ConfigLayer, ConfigResolver};
use crate::error::{OverlayError, OverlayResult};
use crate::input::{InputEvent, Key, PointerEvent};
use crate::kind::PanelKind;
use crate::layer::{LayerId, LayerRenderer};
use crate::listener::{ListenerKey, ListenerRegistry};
use crate::measure::Measurable;
use crate::popover::{CloseReason, GateVerdict, OpenRequest, Popover, PopoverState};
use crate::timer::earliest;

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Instances the event was handed to.
    pub delivered: usize,
    /// A capture layer ate the event; the UI below must not see it.
    pub swallowed: bool,
    /// The instance that stopped propagation, if any.
    pub consumed_by: Option<LayerId>,
}

/// Owns the renderer, the listener table and every instance.
pub struct OverlayManager<R: LayerRenderer> {
    renderer: R,
    viewport: Viewport,
    registry: ListenerRegistry,
    resolver: ConfigResolver,
    /// Bottom to top.
    popovers: Vec<Popover>,
    next_id: u64,
}

impl<R: LayerRenderer> OverlayManager<R> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self {
            renderer,
            viewport,
            registry: ListenerRegistry::new(),
            resolver: ConfigResolver::new(),
            popovers: Vec::new(),
            next_id: 1,
        }
    }

    /// Uses the given theme layers for [`open_kind`](Self::open_kind).
    #[must_use]
    pub fn with_resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The shared listener table.
    #[must_use]
    pub const fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// Creates a closed instance on top of the stack.
    pub fn create(&mut self) -> LayerId {
        let layer = LayerId::new(self.next_id);
        self.next_id += 1;
        self.popovers
            .push(Popover::new(layer, self.viewport, self.registry.clone()));
        tracing::debug!(%layer, "layer created");
        layer
    }

    /// Looks up an instance.
    #[must_use]
    pub fn get(&self, layer: LayerId) -> Option<&Popover> {
        self.popovers.iter().find(|p| p.layer() == layer)
    }

    /// Looks up an instance mutably.
    pub fn get_mut(&mut self, layer: LayerId) -> Option<&mut Popover> {
        self.popovers.iter_mut().find(|p| p.layer() == layer)
    }

    /// Registers the close-request callback for an instance.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownLayer`] if no instance owns `layer`.
    pub fn on_request_close(
        &mut self,
        layer: LayerId,
        callback: impl FnMut(&CloseReason) + Send + 'static,
    ) -> OverlayResult<()> {
        let idx = self.index(layer)?;
        self.popovers[idx].on_request_close(callback);
        Ok(())
    }

    /// Opens an instance and raises it to the top of the stack. A rejected
    /// request leaves the stack as it was.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownLayer`] for a foreign id, or
    /// [`OverlayError::InvalidConfig`] for a config that cannot run.
    pub fn open(
        &mut self,
        layer: LayerId,
        request: OpenRequest,
        now: Duration,
    ) -> OverlayResult<()> {
        let idx = self.index(layer)?;
        let mut popover = self.popovers.remove(idx);
        match popover.request_open(request, &mut self.renderer, now) {
            Ok(()) => {
                self.popovers.push(popover);
                Ok(())
            }
            Err(err) => {
                self.popovers.insert(idx, popover);
                Err(err)
            }
        }
    }

    /// Opens an instance with the kind's origins and the resolved config.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open), plus config resolution failures.
    pub fn open_kind(
        &mut self,
        layer: LayerId,
        anchor: Arc<dyn Measurable>,
        kind: PanelKind,
        overrides: &ConfigLayer,
        now: Duration,
    ) -> OverlayResult<()> {
        let config = self.resolver.resolve(kind, overrides)?;
        self.open(layer, OpenRequest::new(anchor, kind).with_config(config), now)
    }

    /// Closes an instance.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownLayer`] if no instance owns `layer`.
    pub fn close(
        &mut self,
        layer: LayerId,
        reason: Option<&CloseReason>,
        now: Duration,
    ) -> OverlayResult<()> {
        let idx = self.index(layer)?;
        self.popovers[idx].request_close(reason, &mut self.renderer, now);
        Ok(())
    }

    /// Forwards a finished asynchronous mount.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownLayer`] if no instance owns `layer`.
    pub fn mount_completed(
        &mut self,
        layer: LayerId,
        panel: Arc<dyn Measurable>,
        now: Duration,
    ) -> OverlayResult<()> {
        let idx = self.index(layer)?;
        self.popovers[idx].mount_completed(panel, &mut self.renderer, now);
        Ok(())
    }

    /// Tears an instance down and forgets it.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownLayer`] if no instance owns `layer`.
    pub fn remove(&mut self, layer: LayerId) -> OverlayResult<()> {
        let idx = self.index(layer)?;
        let mut popover = self.popovers.remove(idx);
        popover.teardown(&mut self.renderer);
        tracing::debug!(%layer, "layer removed");
        Ok(())
    }

    /// Routes one host event to the subscribed instances.
    pub fn dispatch(&mut self, event: InputEvent, now: Duration) -> Dispatch {
        match event {
            InputEvent::Pointer(pointer) => self.dispatch_pointer(&pointer, now),
            InputEvent::Scroll(container) => {
                let key = ListenerKey::Scroll(container);
                let mut dispatch = Dispatch::default();
                for popover in &mut self.popovers {
                    if self.registry.is_subscribed(key, popover.layer()) {
                        popover.on_scroll(now, &mut self.renderer);
                        dispatch.delivered += 1;
                    }
                }
                dispatch
            }
            InputEvent::Resize(viewport) => {
                self.viewport = viewport;
                let mut dispatch = Dispatch::default();
                for popover in &mut self.popovers {
                    if self.registry.is_subscribed(ListenerKey::Resize, popover.layer()) {
                        dispatch.delivered += 1;
                    }
                    // Closed instances still need the size for their next open.
                    popover.on_resize(viewport, now, &mut self.renderer);
                }
                dispatch
            }
            InputEvent::Key(key) => self.dispatch_key(key, now),
        }
    }

    fn dispatch_pointer(&mut self, event: &PointerEvent, now: Duration) -> Dispatch {
        let mut dispatch = Dispatch::default();

        for popover in self.popovers.iter_mut().rev() {
            if !self.registry.is_subscribed(ListenerKey::Pointer, popover.layer()) {
                continue;
            }
            dispatch.delivered += 1;

            match popover.on_pointer(event, &mut self.renderer, now) {
                GateVerdict::Inside => {
                    dispatch.consumed_by = Some(popover.layer());
                    break;
                }
                GateVerdict::Outside { swallowed: true, .. } | GateVerdict::Blocked => {
                    dispatch.swallowed = true;
                    dispatch.consumed_by = Some(popover.layer());
                    break;
                }
                _ => {}
            }
        }
        dispatch
    }

    /// Keys go to the topmost subscriber only.
    fn dispatch_key(&mut self, key: Key, now: Duration) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let topmost = self
            .popovers
            .iter_mut()
            .rev()
            .find(|p| self.registry.is_subscribed(ListenerKey::Key, p.layer()));

        if let Some(popover) = topmost {
            dispatch.delivered = 1;
            if popover.on_key(key, &mut self.renderer, now) {
                dispatch.consumed_by = Some(popover.layer());
            }
        }
        dispatch
    }

    /// Fires due timers on every instance.
    pub fn tick(&mut self, now: Duration) {
        for popover in &mut self.popovers {
            popover.tick(now, &mut self.renderer);
        }
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.popovers
            .iter()
            .fold(None, |acc, p| earliest(acc, p.next_deadline()))
    }

    /// Layers that are not closed, bottom to top.
    #[must_use]
    pub fn open_layers(&self) -> Vec<LayerId> {
        self.popovers
            .iter()
            .filter(|p| p.state() != PopoverState::Closed)
            .map(Popover::layer)
            .collect()
    }

    fn index(&self, layer: LayerId) -> OverlayResult<usize> {
        self.popovers
            .iter()
            .position(|p| p.layer() == layer)
            .ok_or_else(|| {
                tracing::warn!(%layer, "unknown layer");
                OverlayError::UnknownLayer(layer)
            })
    }
}

impl<R: LayerRenderer> Drop for OverlayManager<R> {
    fn drop(&mut self) {
        for popover in &mut self.popovers {
            popover.teardown(&mut self.renderer);
        }
    }
}
